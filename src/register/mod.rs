//! Definiciones de registros para el BMM150
//!
//! Direcciones absolutas del mapa de registros del sensor. Todos los valores
//! multibyte son little-endian.

/// Registros de identificación y datos
pub mod registers {
    /// Identificador del chip (solo lectura)
    pub const CHIP_ID: u8 = 0x40;

    // Registros de datos: X, Y, Z y RHALL + estado (2 bytes cada uno)
    pub const DATA_X_LSB: u8 = 0x42;
    pub const DATA_X_MSB: u8 = 0x43;
    pub const DATA_Y_LSB: u8 = 0x44;
    pub const DATA_Y_MSB: u8 = 0x45;
    pub const DATA_Z_LSB: u8 = 0x46;
    pub const DATA_Z_MSB: u8 = 0x47;
    pub const RHALL_LSB: u8 = 0x48;
    pub const RHALL_MSB: u8 = 0x49;

    /// Número de bytes del bloque de datos
    pub const DATA_LEN: usize = 8;

    // Registros de control
    pub const POWER_AND_OPERATIONS: u8 = 0x4B;
    pub const OP_MODE_SELF_TEST_ODR: u8 = 0x4C;

    // Registros de repeticiones
    pub const REPETITIONS_XY: u8 = 0x51;
    pub const REPETITIONS_Z: u8 = 0x52;
}

/// Registros de trim (calibración de fábrica)
pub mod trim_reg {
    pub const DIG_X1: u8 = 0x5D;
    pub const DIG_Y1: u8 = 0x5E;
    pub const DIG_Z4_LSB: u8 = 0x62;
    pub const DIG_Z4_MSB: u8 = 0x63;
    pub const DIG_X2: u8 = 0x64;
    pub const DIG_Y2: u8 = 0x65;
    pub const DIG_Z2_LSB: u8 = 0x68;
    pub const DIG_Z2_MSB: u8 = 0x69;
    pub const DIG_Z1_LSB: u8 = 0x6A;
    pub const DIG_Z1_MSB: u8 = 0x6B;
    pub const DIG_XYZ1_LSB: u8 = 0x6C;
    pub const DIG_XYZ1_MSB: u8 = 0x6D;
    pub const DIG_Z3_LSB: u8 = 0x6E;
    pub const DIG_Z3_MSB: u8 = 0x6F;
    pub const DIG_XY2: u8 = 0x70;
    pub const DIG_XY1: u8 = 0x71;

    /// Longitud del bloque de trim (0x5D..=0x71)
    pub const TRIM_BLOCK_LEN: usize = (DIG_XY1 - DIG_X1) as usize + 1;
}

/// Valores y bits para los registros de control
pub mod values {
    /// Valor esperado en CHIP_ID
    pub const CHIP_ID_VAL: u8 = 0x32;

    /// Bit de control de energía (suspend -> sleep)
    pub const POWER_CONTROL_VAL: u8 = 1 << 0;
    /// Soft reset (bits 7 y 1 junto con el bit de control de energía)
    pub const SOFT_RESET: u8 = (1 << 7) | (1 << 1);

    /// Modo normal en OP_MODE (bits [2:1] = 00)
    pub const NORMAL_MODE: u8 = 0 << 1;
    /// Modo forzado
    pub const FORCED_MODE: u8 = 1 << 1;
    /// Modo sleep
    pub const SLEEP_MODE: u8 = 3 << 1;

    /// Posición de los bits de ODR en OP_MODE (bits [5:3])
    pub const ODR_SHIFT: u8 = 3;
    pub const ODR_MASK: u8 = 0b111 << ODR_SHIFT;

    /// Bit de dato listo en RHALL_LSB
    pub const DATA_READY: u16 = 0x0001;
}
