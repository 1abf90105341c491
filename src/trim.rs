//! Carga de los coeficientes de trim del BMM150
//!
//! Los coeficientes se programan en fábrica y se leen una única vez durante la
//! inicialización, en una sola transacción que cubre todo el bloque.

use bytemuck::{Pod, Zeroable};

use crate::device::Bmm150Error;
use crate::interface::Interface;
use crate::register::trim_reg;

/// Imagen de los registros 0x5D..=0x71 tal y como salen del bus
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct TrimRegisters {
    dig_x1: i8,
    dig_y1: i8,
    rsv: [u8; 3],
    dig_z4: [u8; 2],
    dig_x2: i8,
    dig_y2: i8,
    rsv2: [u8; 2],
    dig_z2: [u8; 2],
    dig_z1: [u8; 2],
    dig_xyz1: [u8; 2],
    dig_z3: [u8; 2],
    dig_xy2: i8,
    dig_xy1: u8,
}

/// Coeficientes de trim decodificados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimCoefficients {
    pub x1: i8,
    pub y1: i8,
    pub x2: i8,
    pub y2: i8,
    pub z1: u16,
    pub z2: i16,
    pub z3: i16,
    pub z4: i16,
    pub xy1: u8,
    pub xy2: i8,
    pub xyz1: u16,
}

impl TrimCoefficients {
    /// Decodifica el bloque de trim. Cualquier patrón de bytes es válido;
    /// los bytes reservados se ignoran.
    pub fn from_registers(raw: &[u8; trim_reg::TRIM_BLOCK_LEN]) -> Self {
        let regs: TrimRegisters = bytemuck::pod_read_unaligned(raw);

        Self {
            x1: regs.dig_x1,
            y1: regs.dig_y1,
            x2: regs.dig_x2,
            y2: regs.dig_y2,
            z1: u16::from_le_bytes(regs.dig_z1),
            z2: i16::from_le_bytes(regs.dig_z2),
            z3: i16::from_le_bytes(regs.dig_z3),
            z4: i16::from_le_bytes(regs.dig_z4),
            xy1: regs.dig_xy1,
            xy2: regs.dig_xy2,
            xyz1: u16::from_le_bytes(regs.dig_xyz1),
        }
    }
}

/// Lee y decodifica el bloque de trim. Solo falla si falla el bus.
pub fn load_trim_values<I: Interface>(bus: &mut I) -> Result<TrimCoefficients, Bmm150Error> {
    let mut raw = [0u8; trim_reg::TRIM_BLOCK_LEN];
    bus.read_reg(trim_reg::DIG_X1, &mut raw)
        .map_err(Bmm150Error::from_error)?;

    let dig = TrimCoefficients::from_registers(&raw);
    log::debug!("BMM150: trim {:?}", dig);
    Ok(dig)
}
