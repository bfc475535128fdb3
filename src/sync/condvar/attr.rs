//! Atributos de Condition Variable (pthread_condattr_t)
//!
//! `pshared` não existe: condvars entre processos estão fora do escopo.

use crate::config::COND_MAX_WAITERS;
use crate::time::ClockId;

/// Atributos aplicados na construção ou no `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CondAttr {
    capacity: usize,
    clock: ClockId,
}

impl CondAttr {
    /// Capacidade de `COND_MAX_WAITERS`, relógio `Realtime`
    pub const fn new() -> Self {
        Self {
            capacity: COND_MAX_WAITERS,
            clock: ClockId::Realtime,
        }
    }

    /// Sobrescreve o número de slots de espera
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Relógio contra o qual os prazos de `timed_wait` são medidos
    /// (pthread_condattr_setclock)
    pub const fn with_clock(mut self, clock: ClockId) -> Self {
        self.clock = clock;
        self
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub const fn clock(&self) -> ClockId {
        self.clock
    }
}

impl Default for CondAttr {
    fn default() -> Self {
        Self::new()
    }
}
