//! Contratos con el frontend de navegación y entre backends de brújula

use crate::types::{CompassDevType, CompassInstance, MagField};

/// Frontend que consume las muestras de los backends de brújula.
///
/// Rota las muestras al marco del vehículo, aplica su propia corrección de
/// errores y publica los valores crudos y filtrados.
pub trait CompassFrontend: Send + Sync {
    /// Registra una nueva instancia y devuelve su identificador
    fn register_instance(&self) -> CompassInstance;

    /// Anota el tipo de dispositivo de la instancia
    fn set_device_type(&self, instance: CompassInstance, dev_type: CompassDevType);

    /// Rota el campo del marco del sensor al marco del vehículo
    fn apply_rotation(&self, field: &mut MagField, instance: CompassInstance);

    /// Publica una muestra puntual sin corregir
    fn publish_raw_sample(&self, field: &MagField, timestamp_us: u64, instance: CompassInstance);

    /// Corrige el campo con los errores conocidos (offsets, escala, ...)
    fn apply_correction(&self, field: &mut MagField, instance: CompassInstance);

    /// Publica la muestra promediada
    fn publish_filtered_sample(&self, field: &MagField, instance: CompassInstance);
}

/// Contrato común de los backends de brújula
pub trait CompassBackend: Send + Sync {
    /// Ciclo de muestreo periódico; no bloquea y nunca propaga errores
    fn update(&self);

    /// Publica la media de las muestras acumuladas desde la última lectura
    fn read(&self);

    /// Instancia asignada por el frontend
    fn instance(&self) -> CompassInstance;

    /// Tipo de dispositivo
    fn dev_type(&self) -> CompassDevType;
}
