//! Biblioteca Rust para el magnetómetro Bosch BMM150
//!
//! Esta biblioteca implementa la inicialización del sensor, la compensación en
//! punto fijo con los coeficientes de trim de fábrica y un ciclo de muestreo
//! periódico que convive con la lectura bajo demanda de la media acumulada.

use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// Importaciones internas
pub mod accumulator;
pub mod base;
pub mod bus;
pub mod compensation;
pub mod config;
pub mod conversion;
pub mod device;
pub mod frontend;
pub mod hal;
pub mod interface;
pub mod register;
pub mod trim;
pub mod types;

// Re-exports públicos
pub use accumulator::AccumulatedField;
pub use base::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use bus::Device;
pub use compensation::{compensate_xy, compensate_z};
pub use config::{Bmm150Config, DataRate, Preset};
pub use device::{Bmm150, Bmm150Error};
pub use frontend::{CompassBackend, CompassFrontend};
pub use hal::{HalContext, Scheduler, TimerProcess};
pub use trim::TrimCoefficients;
pub use types::{CompassDevType, CompassInstance, MagField};

use crate::interface::{I2cInterface, SpiInterface};

/// Crea el manejador de un BMM150 conectado por I2C
pub fn new_i2c_device<I>(i2c: I, address: u8) -> Device<I2cInterface<I>>
where
    I: I2c,
{
    Device::new(I2cInterface::new(i2c, address))
}

/// Crea el manejador de un BMM150 conectado por SPI
pub fn new_spi_device<SPI>(spi: SPI) -> Device<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    Device::new(SpiInterface::new(spi))
}
