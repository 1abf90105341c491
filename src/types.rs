//! Definiciones de tipos y constantes comunes para el BMM150

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

/// Tiempos del sensor
pub mod timing {
    /// Espera tras soft reset y cambio de modo de energía (ms)
    pub const SETTLE_DELAY_MS: u32 = 2;
    /// Intervalo mínimo entre dos muestras aceptadas (µs)
    pub const MEASURE_TIME_US: u64 = 10_000;
}

/// Factores de escala
pub mod scale_factor {
    /// Sensibilidad del sensor: 16 LSB/µT
    pub const LSB_PER_UT: f32 = 16.0;
    /// 1 µT = 10 mGauss
    pub const MGAUSS_PER_UT: f32 = 10.0;
}

/// Identificador opaco de la instancia asignado por el frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompassInstance(pub u8);

/// Tipos de dispositivo que se anuncian al frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompassDevType {
    /// Bosch BMM150
    Bmm150,
}

/// Muestra bruta decodificada del bloque de datos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// Eje X (13 bits con signo)
    pub x: i16,
    /// Eje Y (13 bits con signo)
    pub y: i16,
    /// Eje Z (15 bits con signo)
    pub z: i16,
    /// Resistencia hall (14 bits)
    pub hall: u16,
    /// Bit de dato listo
    pub data_ready: bool,
}

/// Campo magnético de tres ejes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagField {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MagField {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Módulo del vector
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Add for MagField {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for MagField {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for MagField {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for MagField {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for MagField {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f32> for MagField {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl From<[f32; 3]> for MagField {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<MagField> for [f32; 3] {
    fn from(f: MagField) -> Self {
        [f.x, f.y, f.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ops() {
        let mut f = MagField::new(1.0, -2.0, 4.0);
        f += MagField::new(1.0, 2.0, 0.0);
        assert_eq!(f, MagField::new(2.0, 0.0, 4.0));
        f /= 2.0;
        assert_eq!(f, MagField::new(1.0, 0.0, 2.0));
        assert_eq!(f * 10.0, MagField::new(10.0, 0.0, 20.0));
    }

    #[test]
    fn test_field_length() {
        let f = MagField::new(3.0, 4.0, 0.0);
        assert!((f.length() - 5.0).abs() < 1e-6);
        assert!(MagField::ZERO.is_zero());
        assert!(!f.is_zero());
    }
}
