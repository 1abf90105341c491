//! Compensación en punto fijo de los ejes del BMM150
//!
//! Convierte las cuentas brutas del ADC y la resistencia hall en valores
//! compensados usando los coeficientes de trim de fábrica. Toda la aritmética
//! es entera de 32 bits con signo (desbordamiento en complemento a dos y
//! desplazamientos aritméticos), igual que el procesamiento nativo del sensor.
//!
//! Las divisiones no definidas (`hall == 0`, divisor nulo) devuelven `None`.

use crate::trim::TrimCoefficients;

/// Límite de saturación del eje Z
pub const Z_CLAMP: i32 = 0x8000;

/// Compensa un eje X o Y.
///
/// # Arguments
/// * `raw` - Valor bruto del eje ya desplazado 3 bits
/// * `hall` - Resistencia hall
/// * `txy1` - `x1` o `y1` del trim
/// * `txy2` - `x2` o `y2` del trim
/// * `dig` - Coeficientes de trim
pub fn compensate_xy(
    raw: i16,
    hall: u16,
    txy1: i8,
    txy2: i8,
    dig: &TrimCoefficients,
) -> Option<i16> {
    let hall = i32::from(hall);
    if hall == 0 {
        return None;
    }

    let inter = ((i32::from(dig.xyz1) << 14) / hall).wrapping_sub(0x4000);

    let mut val = i32::from(dig.xy2).wrapping_mul(inter.wrapping_mul(inter) >> 7);
    val = val.wrapping_add(inter.wrapping_mul(i32::from(dig.xy1) << 7));
    val >>= 9;
    val = val.wrapping_add(0x10_0000);
    val = val.wrapping_mul(i32::from(txy2) + 0xA0);
    val >>= 12;
    val = val.wrapping_mul(i32::from(raw));
    val >>= 13;
    val = val.wrapping_add(i32::from(txy1) << 3);

    // Truncado a 16 bits
    Some(val as i16)
}

/// Compensa el eje Z. El resultado queda saturado a `[-32768, 32768]`.
pub fn compensate_z(raw_z: i16, hall: u16, dig: &TrimCoefficients) -> Option<i32> {
    let hall = i32::from(hall);

    let mut dividend = (i32::from(raw_z) - i32::from(dig.z4)) << 15;
    dividend =
        dividend.wrapping_sub(i32::from(dig.z3).wrapping_mul(hall - i32::from(dig.xyz1)) >> 2);

    let mut divisor = i32::from(dig.z1).wrapping_mul(hall << 1);
    divisor = divisor.wrapping_add(0x8000) >> 16;
    divisor = divisor.wrapping_add(i32::from(dig.z2));

    // checked_div cubre divisor == 0 y i32::MIN / -1
    dividend
        .checked_div(divisor)
        .map(|z| z.clamp(-Z_CLAMP, Z_CLAMP))
}
