//! Configuración del BMM150: tasa de salida de datos y repeticiones

use crate::register::values::{NORMAL_MODE, ODR_SHIFT};

/// Tasas de salida de datos (ODR) en modo normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataRate {
    /// 10 Hz (valor por defecto del chip)
    Hz10 = 0b000,
    /// 2 Hz
    Hz2 = 0b001,
    /// 6 Hz
    Hz6 = 0b010,
    /// 8 Hz
    Hz8 = 0b011,
    /// 15 Hz
    Hz15 = 0b100,
    /// 20 Hz
    Hz20 = 0b101,
    /// 25 Hz
    Hz25 = 0b110,
    /// 30 Hz
    Hz30 = 0b111,
}

impl Default for DataRate {
    fn default() -> Self {
        DataRate::Hz30
    }
}

impl DataRate {
    /// Bits de ODR ya desplazados a su posición en OP_MODE
    pub const fn bits(self) -> u8 {
        (self as u8) << ODR_SHIFT
    }

    pub const fn hz(self) -> u8 {
        match self {
            DataRate::Hz2 => 2,
            DataRate::Hz6 => 6,
            DataRate::Hz8 => 8,
            DataRate::Hz10 => 10,
            DataRate::Hz15 => 15,
            DataRate::Hz20 => 20,
            DataRate::Hz25 => 25,
            DataRate::Hz30 => 30,
        }
    }
}

/// Presets recomendados de repeticiones (tiempo de medida frente a precisión)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// XY = 3, Z = 3
    LowPower,
    /// XY = 9, Z = 15
    Regular,
    /// XY = 15, Z = 27
    Enhanced,
    /// XY = 47, Z = 83
    HighAccuracy,
}

impl Default for Preset {
    fn default() -> Self {
        Preset::HighAccuracy
    }
}

impl Preset {
    /// Número de repeticiones (XY, Z)
    pub const fn repetitions(self) -> (u8, u8) {
        match self {
            Preset::LowPower => (3, 3),
            Preset::Regular => (9, 15),
            Preset::Enhanced => (15, 27),
            Preset::HighAccuracy => (47, 83),
        }
    }

    /// Valor para REPETITIONS_XY: nXY = 1 + 2 * reg
    pub const fn xy_register(self) -> u8 {
        (self.repetitions().0 - 1) / 2
    }

    /// Valor para REPETITIONS_Z: nZ = 1 + reg
    pub const fn z_register(self) -> u8 {
        self.repetitions().1 - 1
    }
}

/// Configuración aplicada durante la inicialización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bmm150Config {
    pub data_rate: DataRate,
    pub preset: Preset,
}

impl Bmm150Config {
    pub fn new(data_rate: DataRate, preset: Preset) -> Self {
        Self { data_rate, preset }
    }

    /// Valor de OP_MODE: modo normal con la ODR seleccionada
    pub const fn op_mode(&self) -> u8 {
        NORMAL_MODE | self.data_rate.bits()
    }
}
