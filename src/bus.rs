//! Manejador del dispositivo en un bus compartido
//!
//! `Device` es el dueño de la interfaz y de su primitiva de exclusión mutua.
//! El mismo bus puede compartirse con otros drivers clonando el `Arc`.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use crate::interface::Interface;

/// Interfaz protegida por el semáforo del bus
pub struct Device<I> {
    bus: Arc<Mutex<I>>,
}

impl<I> Clone for Device<I> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
        }
    }
}

impl<I: Interface> Device<I> {
    /// Crea un bus de uso exclusivo para esta interfaz
    pub fn new(interface: I) -> Self {
        Self {
            bus: Arc::new(Mutex::new(interface)),
        }
    }

    /// Usa un bus ya compartido con otros dispositivos
    pub fn shared(bus: Arc<Mutex<I>>) -> Self {
        Self { bus }
    }

    /// Acceso al bus subyacente
    pub fn bus(&self) -> &Arc<Mutex<I>> {
        &self.bus
    }

    /// Toma el semáforo esperando indefinidamente. Se libera al soltar el guard.
    pub fn lock(&self) -> MutexGuard<'_, I> {
        self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Intenta tomar el semáforo sin bloquear
    pub fn try_lock(&self) -> Option<MutexGuard<'_, I>> {
        match self.bus.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}
