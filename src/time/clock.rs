//! Arquivo: time/clock.rs
//!
//! Propósito: Representar instantes dos relógios do sistema.
//! `Realtime` reflete a data e hora humana (UTC) e pode ser ajustado;
//! `Monotonic` conta a partir do boot e nunca retrocede.

use crate::config::NANOS_PER_SECOND;

/// Relógio usado para medir prazos de `timed_wait`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockId {
    /// CLOCK_REALTIME (padrão POSIX para condvars)
    #[default]
    Realtime,
    /// CLOCK_MONOTONIC
    Monotonic,
}

/// Falha na leitura do relógio pelo kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockError;

/// Segundos e Nanosegundos desde a origem do relógio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeSpec {
    pub seconds: u64,
    pub nanos: u32,
}

impl TimeSpec {
    pub const fn new(seconds: u64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Nanosegundos devem estar em `[0, 1e9)`
    pub const fn is_valid(&self) -> bool {
        (self.nanos as u64) < NANOS_PER_SECOND
    }

    /// Total em nanosegundos
    pub fn as_nanos(&self) -> u128 {
        self.seconds as u128 * NANOS_PER_SECOND as u128 + self.nanos as u128
    }

    /// `self - earlier` em nanosegundos, ou `None` se `self` não está no futuro
    pub fn nanos_after(&self, earlier: &TimeSpec) -> Option<u128> {
        let (a, b) = (self.as_nanos(), earlier.as_nanos());
        if a > b {
            Some(a - b)
        } else {
            None
        }
    }

    /// Soma milissegundos (útil para montar prazos relativos)
    pub fn plus_millis(&self, millis: u64) -> TimeSpec {
        let total = self.as_nanos() + millis as u128 * 1_000_000;
        Self::from_nanos(total)
    }

    fn from_nanos(total: u128) -> TimeSpec {
        let per_sec = NANOS_PER_SECOND as u128;
        TimeSpec {
            seconds: (total / per_sec).min(u64::MAX as u128) as u64,
            nanos: (total % per_sec) as u32,
        }
    }
}
