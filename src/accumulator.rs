//! Acumulador de campo compartido entre el muestreo periódico y la lectura

use crate::types::MagField;

/// Número de muestras al que el acumulador se reduce a la mitad
pub const ACCUM_LIMIT: u8 = 10;

/// Suma acumulada de campos y número de muestras.
///
/// `count` siempre está en `[0, ACCUM_LIMIT)`: al llegar al límite se dividen
/// a la vez la suma y la cuenta, conservando una media que decae.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccumulatedField {
    sum: MagField,
    count: u8,
}

impl AccumulatedField {
    pub const fn new() -> Self {
        Self {
            sum: MagField::ZERO,
            count: 0,
        }
    }

    pub fn sum(&self) -> MagField {
        self.sum
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Añade una muestra corregida
    pub fn push(&mut self, field: MagField) {
        self.sum += field;
        self.count += 1;
        if self.count == ACCUM_LIMIT {
            self.sum /= 2.0;
            self.count = ACCUM_LIMIT / 2;
        }
    }

    /// Devuelve la media y deja el acumulador vacío
    pub fn drain(&mut self) -> Option<MagField> {
        if self.count == 0 {
            return None;
        }
        let average = self.sum / f32::from(self.count);
        *self = Self::new();
        Some(average)
    }
}
