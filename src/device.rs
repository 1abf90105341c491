//! Driver del magnetómetro BMM150
//!
//! Inicialización (`probe`), ciclo de muestreo periódico (`update`) y lectura
//! bajo demanda (`read`) de la media de muestras acumuladas.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;

use crate::accumulator::AccumulatedField;
use crate::base::TimeSource;
use crate::bus::Device;
use crate::compensation::{compensate_xy, compensate_z};
use crate::config::Bmm150Config;
use crate::conversion::{compensated_to_mgauss, decode_raw_sample};
use crate::frontend::{CompassBackend, CompassFrontend};
use crate::hal::{HalContext, Scheduler, TimerProcess};
use crate::interface::Interface;
use crate::register::{registers, values};
use crate::trim::{load_trim_values, TrimCoefficients};
use crate::types::{timing, CompassDevType, CompassInstance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bmm150Error {
    /// Fallo de comunicación con el bus
    InterfaceError,
    /// El registro CHIP_ID no contiene el valor esperado
    WrongChipId(u8),
    /// El semáforo del bus está ocupado
    LockUnavailable,
    /// El bit de dato listo no está activo
    DataNotReady,
    /// Todavía no ha pasado el tiempo de medida desde la última muestra
    RateLimited,
    /// División no definida en la compensación
    Overflow,
}

impl Bmm150Error {
    pub fn from_error<E: fmt::Debug>(error: E) -> Self {
        log::debug!("BMM150: interface error {:?}", error);
        Bmm150Error::InterfaceError
    }
}

impl fmt::Display for Bmm150Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bmm150Error::InterfaceError => write!(f, "bus communication error"),
            Bmm150Error::WrongChipId(id) => write!(f, "wrong chip id 0x{:02X}", id),
            Bmm150Error::LockUnavailable => write!(f, "bus semaphore unavailable"),
            Bmm150Error::DataNotReady => write!(f, "data not ready"),
            Bmm150Error::RateLimited => write!(f, "measurement time not elapsed"),
            Bmm150Error::Overflow => write!(f, "compensation overflow"),
        }
    }
}

impl std::error::Error for Bmm150Error {}

/// Estado compartido entre `update` y `read`
#[derive(Debug, Default)]
struct SamplerState {
    accum: AccumulatedField,
    last_update_us: Option<u64>,
}

/// Instancia del driver BMM150
pub struct Bmm150<I, S, T, F> {
    dev: Device<I>,
    ctx: HalContext<S, T>,
    frontend: Arc<F>,
    dig: TrimCoefficients,
    config: Bmm150Config,
    instance: CompassInstance,
    state: Mutex<SamplerState>,
}

impl<I, S, T, F> Bmm150<I, S, T, F>
where
    I: Interface + Send + 'static,
    S: Scheduler + 'static,
    T: TimeSource + 'static,
    F: CompassFrontend + 'static,
{
    /// Detecta e inicializa el sensor, lo registra en el frontend y registra
    /// el ciclo de muestreo en el planificador.
    ///
    /// Durante la configuración los procesos periódicos están suspendidos y
    /// el semáforo del bus tomado; ambos se liberan en cualquier salida. Si
    /// falla, no queda nada registrado.
    pub fn probe<D: DelayNs>(
        frontend: Arc<F>,
        dev: Device<I>,
        ctx: HalContext<S, T>,
        delay: &mut D,
        config: Bmm150Config,
    ) -> Result<Arc<Self>, Bmm150Error> {
        let dig = {
            let _suspended = ctx.scheduler.suspend();
            let mut bus = dev.lock();
            init_sensor(&mut *bus, delay, &config)?
        };

        let instance = frontend.register_instance();
        frontend.set_device_type(instance, CompassDevType::Bmm150);

        let scheduler = Arc::clone(&ctx.scheduler);
        let driver = Arc::new(Self {
            dev,
            ctx,
            frontend,
            dig,
            config,
            instance,
            state: Mutex::new(SamplerState::default()),
        });
        scheduler.register_timer_process(Arc::clone(&driver) as Arc<dyn TimerProcess>);

        log::info!(
            "BMM150: instance {:?} ready, ODR {} Hz, preset {:?}",
            instance,
            config.data_rate.hz(),
            config.preset
        );
        Ok(driver)
    }

    /// Ciclo de muestreo. Los ciclos fallidos se descartan sin propagar nada.
    pub fn update(&self) {
        if let Err(e) = self.sample() {
            log::trace!("BMM150: cycle skipped: {}", e);
        }
    }

    fn sample(&self) -> Result<(), Bmm150Error> {
        let now = self.ctx.now_us();

        let last_update_us = self.lock_state().last_update_us;
        if let Some(last) = last_update_us {
            if now.wrapping_sub(last) < timing::MEASURE_TIME_US {
                return Err(Bmm150Error::RateLimited);
            }
        }

        let mut data = [0u8; registers::DATA_LEN];
        {
            let mut bus = self.dev.try_lock().ok_or(Bmm150Error::LockUnavailable)?;
            bus.read_reg(registers::DATA_X_LSB, &mut data)
                .map_err(Bmm150Error::from_error)?;
        }

        let raw = decode_raw_sample(&data);
        if !raw.data_ready {
            return Err(Bmm150Error::DataNotReady);
        }

        let dig = &self.dig;
        let x = compensate_xy(raw.x, raw.hall, dig.x1, dig.x2, dig).ok_or(Bmm150Error::Overflow)?;
        let y = compensate_xy(raw.y, raw.hall, dig.y1, dig.y2, dig).ok_or(Bmm150Error::Overflow)?;
        let z = compensate_z(raw.z, raw.hall, dig).ok_or(Bmm150Error::Overflow)?;

        let mut field = compensated_to_mgauss(x, y, z);

        self.frontend.apply_rotation(&mut field, self.instance);
        self.frontend.publish_raw_sample(&field, now, self.instance);
        self.frontend.apply_correction(&mut field, self.instance);

        let mut state = self.lock_state();
        state.accum.push(field);
        state.last_update_us = Some(now);
        Ok(())
    }

    /// Publica la media de las muestras acumuladas y vacía el acumulador.
    /// Sin muestras no publica nada.
    pub fn read(&self) {
        let suspended = self.ctx.scheduler.suspend();
        let average = self.lock_state().accum.drain();
        drop(suspended);

        if let Some(field) = average {
            self.frontend.publish_filtered_sample(&field, self.instance);
        }
    }
}

impl<I, S, T, F> Bmm150<I, S, T, F> {
    fn lock_state(&self) -> MutexGuard<'_, SamplerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Coeficientes de trim leídos durante la inicialización
    pub fn trim(&self) -> &TrimCoefficients {
        &self.dig
    }

    pub fn config(&self) -> &Bmm150Config {
        &self.config
    }

    pub fn instance(&self) -> CompassInstance {
        self.instance
    }

    /// Copia del estado del acumulador
    pub fn accumulated(&self) -> AccumulatedField {
        self.lock_state().accum
    }

    /// Timestamp de la última muestra aceptada
    pub fn last_update_us(&self) -> Option<u64> {
        self.lock_state().last_update_us
    }
}

impl<I, S, T, F> TimerProcess for Bmm150<I, S, T, F>
where
    I: Interface + Send + 'static,
    S: Scheduler + 'static,
    T: TimeSource + 'static,
    F: CompassFrontend + 'static,
{
    fn timer_tick(&self) {
        self.update();
    }
}

impl<I, S, T, F> CompassBackend for Bmm150<I, S, T, F>
where
    I: Interface + Send + 'static,
    S: Scheduler + 'static,
    T: TimeSource + 'static,
    F: CompassFrontend + 'static,
{
    fn update(&self) {
        Bmm150::update(self);
    }

    fn read(&self) {
        Bmm150::read(self);
    }

    fn instance(&self) -> CompassInstance {
        self.instance
    }

    fn dev_type(&self) -> CompassDevType {
        CompassDevType::Bmm150
    }
}

/// Secuencia de inicialización con el bus ya tomado. Devuelve el trim.
fn init_sensor<I: Interface, D: DelayNs>(
    bus: &mut I,
    delay: &mut D,
    config: &Bmm150Config,
) -> Result<TrimCoefficients, Bmm150Error> {
    let result = configure_sensor(bus, delay, config);
    match result {
        Ok(_) => {}
        Err(Bmm150Error::WrongChipId(id)) => log::warn!("BMM150: Wrong id 0x{:02X}", id),
        Err(_) => log::error!("BMM150: Bus communication error"),
    }
    result
}

fn configure_sensor<I: Interface, D: DelayNs>(
    bus: &mut I,
    delay: &mut D,
    config: &Bmm150Config,
) -> Result<TrimCoefficients, Bmm150Error> {
    // Soft reset
    write_reg(bus, registers::POWER_AND_OPERATIONS, values::SOFT_RESET)?;
    delay.delay_ms(timing::SETTLE_DELAY_MS);

    // Suspend -> sleep
    write_reg(bus, registers::POWER_AND_OPERATIONS, values::POWER_CONTROL_VAL)?;
    delay.delay_ms(timing::SETTLE_DELAY_MS);

    let mut chip_id = [0u8];
    bus.read_reg(registers::CHIP_ID, &mut chip_id)
        .map_err(Bmm150Error::from_error)?;
    if chip_id[0] != values::CHIP_ID_VAL {
        return Err(Bmm150Error::WrongChipId(chip_id[0]));
    }

    let dig = load_trim_values(bus)?;

    write_reg(bus, registers::REPETITIONS_XY, config.preset.xy_register())?;
    write_reg(bus, registers::REPETITIONS_Z, config.preset.z_register())?;

    // Sleep -> normal con la ODR configurada
    write_reg(bus, registers::OP_MODE_SELF_TEST_ODR, config.op_mode())?;

    Ok(dig)
}

fn write_reg<I: Interface>(bus: &mut I, reg: u8, value: u8) -> Result<(), Bmm150Error> {
    bus.write_reg(reg, &[value]).map_err(Bmm150Error::from_error)
}
