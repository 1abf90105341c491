//! Funcionalidades y traits base para el driver

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Trait para obtener un timestamp en microsegundos.
/// Permite implementar diferentes fuentes (sistema, RTOS o simulada).
pub trait TimeSource: Send + Sync {
    /// Retorna el timestamp (en microsegundos)
    fn get_timestamp_us(&self) -> u64;
}

/// Implementación por defecto usando el reloj monotónico del sistema.
pub struct SystemTimeSource {
    start: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn get_timestamp_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

/// Fuente de tiempo controlada manualmente (simulación y pruebas).
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now_us: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(start_us: u64) -> Self {
        Self {
            now_us: AtomicU64::new(start_us),
        }
    }

    /// Fija el tiempo actual
    pub fn set_us(&self, now_us: u64) {
        self.now_us.store(now_us, Ordering::SeqCst);
    }

    /// Avanza el tiempo y devuelve el nuevo valor
    pub fn advance_us(&self, delta_us: u64) -> u64 {
        self.now_us.fetch_add(delta_us, Ordering::SeqCst) + delta_us
    }
}

impl TimeSource for ManualTimeSource {
    fn get_timestamp_us(&self) -> u64 {
        self.now_us.load(Ordering::SeqCst)
    }
}
