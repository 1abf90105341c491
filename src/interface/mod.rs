//! Módulo de abstracción para interfaces de comunicación con el BMM150

use core::fmt::Debug;

use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Operation, SpiDevice};

/// Dirección I2C por defecto (CSB = 1, SDO = 0)
pub const I2C_ADDRESS_DEFAULT: u8 = 0x10;
/// Direcciones I2C alternativas según SDO/CSB
pub const I2C_ADDRESS_ALT: [u8; 3] = [0x11, 0x12, 0x13];

/// Error genérico para interfaces de comunicación
#[derive(Debug, Clone)]
pub enum InterfaceError<E> {
    /// Error de comunicación I2C
    I2cError(E),
    /// Error de comunicación SPI
    SpiError(E),
    /// Parámetro inválido
    InvalidParameter,
}

/// Trait para abstraer el acceso a registros del BMM150
pub trait Interface {
    /// Tipo de error que puede producir la interfaz
    type Error: Debug;

    /// Escribe uno o varios registros consecutivos
    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Lee uno o varios registros consecutivos
    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// Implementación de Interface para I2C
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Crea una nueva interfaz I2C
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Interfaz I2C con la dirección por defecto
    pub fn default_address(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS_DEFAULT)
    }

    /// Consume la interfaz y devuelve el dispositivo I2C subyacente
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = InterfaceError<I2C::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut buffer = [0u8; 17];
        if data.len() > 16 {
            return Err(InterfaceError::InvalidParameter);
        }

        buffer[0] = reg;
        buffer[1..data.len() + 1].copy_from_slice(data);

        self.i2c
            .write(self.addr, &buffer[..data.len() + 1])
            .map_err(InterfaceError::I2cError)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.addr, &[reg], data)
            .map_err(InterfaceError::I2cError)
    }
}

/// Implementación de Interface para SPI (el CS lo gestiona el `SpiDevice`)
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiInterface<SPI> {
    /// Crea una nueva interfaz SPI
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume la interfaz y devuelve el dispositivo SPI
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> Interface for SpiInterface<SPI> {
    type Error = InterfaceError<SPI::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        // Escritura: bit más significativo a 0
        let write_reg = [reg & 0x7F];
        self.spi
            .transaction(&mut [Operation::Write(&write_reg), Operation::Write(data)])
            .map_err(InterfaceError::SpiError)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        // Lectura: bit más significativo a 1
        let read_reg = [reg | 0x80];
        self.spi
            .transaction(&mut [Operation::Write(&read_reg), Operation::Read(data)])
            .map_err(InterfaceError::SpiError)
    }
}
