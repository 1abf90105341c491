//! Funciones de conversión para datos del sensor BMM150
//!
//! Decodificación del bloque de datos (X, Y, Z, RHALL) y conversión de las
//! cuentas compensadas a unidades físicas.

use crate::register::registers::DATA_LEN;
use crate::register::values::DATA_READY;
use crate::types::{scale_factor, MagField, RawSample};

/// Decodifica los 8 bytes leídos desde DATA_X_LSB
///
/// X e Y ocupan los 13 bits altos, Z los 15 bits altos y la resistencia hall
/// los 14 bits altos del cuarto registro; el bit 0 de este es el de dato listo.
pub fn decode_raw_sample(data: &[u8; DATA_LEN]) -> RawSample {
    let x = i16::from_le_bytes([data[0], data[1]]);
    let y = i16::from_le_bytes([data[2], data[3]]);
    let z = i16::from_le_bytes([data[4], data[5]]);
    let rhall = u16::from_le_bytes([data[6], data[7]]);

    RawSample {
        x: x >> 3,
        y: y >> 3,
        z: z >> 1,
        hall: rhall >> 2,
        data_ready: rhall & DATA_READY != 0,
    }
}

/// Convierte cuentas compensadas (16 LSB/µT) a microteslas
#[inline]
pub fn lsb_to_ut(value: f32) -> f32 {
    value / scale_factor::LSB_PER_UT
}

/// Convierte microteslas a miligauss
#[inline]
pub fn ut_to_mgauss(value: f32) -> f32 {
    value * scale_factor::MGAUSS_PER_UT
}

/// Convierte un vector compensado en LSB a miligauss
pub fn compensated_to_mgauss(x: i16, y: i16, z: i32) -> MagField {
    let mut field = MagField::new(f32::from(x), f32::from(y), z as f32);
    field /= scale_factor::LSB_PER_UT;
    field *= scale_factor::MGAUSS_PER_UT;
    field
}
