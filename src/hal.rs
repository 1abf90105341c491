//! Contexto de HAL inyectado en el driver
//!
//! Agrupa el planificador de tareas periódicas y la fuente de tiempo. Se pasa
//! explícitamente al construir el driver en lugar de depender de estado global.

use std::sync::Arc;

use crate::base::TimeSource;

/// Proceso invocado periódicamente por el planificador
pub trait TimerProcess: Send + Sync {
    fn timer_tick(&self);
}

/// Planificador de procesos periódicos
pub trait Scheduler: Send + Sync {
    /// Impide que se ejecuten procesos periódicos hasta `resume_timer_procs`.
    /// Si hay un proceso en curso, espera a que termine.
    fn suspend_timer_procs(&self);

    /// Reanuda la ejecución de procesos periódicos
    fn resume_timer_procs(&self);

    /// Registra un proceso periódico
    fn register_timer_process(&self, process: Arc<dyn TimerProcess>);

    /// Suspende los procesos periódicos hasta que se suelte el guard
    fn suspend(&self) -> TimerProcsSuspended<'_, Self>
    where
        Self: Sized,
    {
        self.suspend_timer_procs();
        TimerProcsSuspended { scheduler: self }
    }
}

/// Guard que reanuda los procesos periódicos al soltarse
pub struct TimerProcsSuspended<'a, S: Scheduler> {
    scheduler: &'a S,
}

impl<S: Scheduler> Drop for TimerProcsSuspended<'_, S> {
    fn drop(&mut self) {
        self.scheduler.resume_timer_procs();
    }
}

/// Contexto explícito: planificador y reloj
pub struct HalContext<S, T> {
    pub scheduler: Arc<S>,
    pub clock: Arc<T>,
}

impl<S, T> Clone for HalContext<S, T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Arc::clone(&self.scheduler),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: Scheduler, T: TimeSource> HalContext<S, T> {
    pub fn new(scheduler: Arc<S>, clock: Arc<T>) -> Self {
        Self { scheduler, clock }
    }

    /// Timestamp actual en microsegundos
    pub fn now_us(&self) -> u64 {
        self.clock.get_timestamp_us()
    }
}
