//! Arquivo: time/ticks.rs
//!
//! Propósito: Conversão de prazos absolutos para atrasos em ticks.
//!
//! Detalhes de Implementação:
//! - Arredonda para cima: um prazo nunca expira antes do instante pedido.
//! - Prazos no passado viram atraso zero (timeout imediato, não erro).
//! - Atrasos finitos saturam em `Ticks::MAX_FINITE`, nunca em `FOREVER`.

use super::clock::TimeSpec;
use crate::config::NANOS_PER_SECOND;

/// Atraso relativo em ticks do scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticks(pub u32);

impl Ticks {
    /// Sentinela de espera infinita (portMAX_DELAY)
    pub const FOREVER: Ticks = Ticks(u32::MAX);

    /// Maior atraso finito representável
    pub const MAX_FINITE: Ticks = Ticks(u32::MAX - 1);

    /// Nenhuma espera
    pub const ZERO: Ticks = Ticks(0);

    #[inline]
    pub const fn is_forever(self) -> bool {
        self.0 == u32::MAX
    }

    /// Converte nanosegundos para ticks (arredondando para cima).
    pub fn from_nanos(nanos: u128, tick_rate_hz: u32) -> Ticks {
        let per_sec = NANOS_PER_SECOND as u128;
        let scaled = nanos * tick_rate_hz.max(1) as u128;
        let mut ticks = scaled / per_sec;
        if scaled % per_sec != 0 {
            ticks += 1;
        }

        if ticks > Self::MAX_FINITE.0 as u128 {
            Self::MAX_FINITE
        } else {
            Ticks(ticks as u32)
        }
    }

    /// Converte milisegundos para ticks.
    #[inline]
    pub fn from_millis(millis: u64, tick_rate_hz: u32) -> Ticks {
        Self::from_nanos(millis as u128 * 1_000_000, tick_rate_hz)
    }

    /// Converte ticks de volta para milisegundos (para ports de simulação).
    pub fn as_millis(self, tick_rate_hz: u32) -> u64 {
        (self.0 as u64 * 1000).div_ceil(tick_rate_hz.max(1) as u64)
    }
}

/// Erros da conversão de prazo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineError {
    /// Nanosegundos fora de `[0, 1e9)`
    InvalidTimeSpec,
}

/// Calcula o atraso entre `now` e o prazo absoluto `deadline`.
pub fn delay_until(deadline: &TimeSpec, now: &TimeSpec, tick_rate_hz: u32) -> Result<Ticks, DeadlineError> {
    if !deadline.is_valid() {
        return Err(DeadlineError::InvalidTimeSpec);
    }

    match deadline.nanos_after(now) {
        Some(nanos) => Ok(Ticks::from_nanos(nanos, tick_rate_hz)),
        None => Ok(Ticks::ZERO),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rounds_partial_ticks_up() {
        // 1 tick = 1ms a 1000Hz; 1ns ainda custa um tick inteiro
        assert_eq!(Ticks::from_nanos(1, 1000), Ticks(1));
        assert_eq!(Ticks::from_nanos(1_000_000, 1000), Ticks(1));
        assert_eq!(Ticks::from_nanos(1_000_001, 1000), Ticks(2));
        assert_eq!(Ticks::from_millis(25, 100), Ticks(3));
    }

    #[test]
    fn past_deadline_is_zero_delay() {
        let now = TimeSpec::new(100, 0);
        assert_eq!(delay_until(&TimeSpec::new(99, 0), &now, 1000), Ok(Ticks::ZERO));
        assert_eq!(delay_until(&now, &now, 1000), Ok(Ticks::ZERO));
    }

    #[test]
    fn future_deadline_converts_to_ticks() {
        let now = TimeSpec::new(100, 0);
        let deadline = TimeSpec::new(100, 250_000_000);
        assert_eq!(delay_until(&deadline, &now, 1000), Ok(Ticks(250)));
    }

    #[test]
    fn invalid_nanos_are_rejected() {
        let now = TimeSpec::new(0, 0);
        let bad = TimeSpec::new(5, 1_000_000_000);
        assert_eq!(delay_until(&bad, &now, 1000), Err(DeadlineError::InvalidTimeSpec));
    }

    #[test]
    fn huge_delays_saturate_below_forever() {
        let now = TimeSpec::new(0, 0);
        let far = TimeSpec::new(u64::MAX / 2, 0);
        let ticks = delay_until(&far, &now, 1000).unwrap();
        assert_eq!(ticks, Ticks::MAX_FINITE);
        assert!(!ticks.is_forever());
    }

    #[test]
    fn millis_round_trip_at_coarse_rates() {
        assert_eq!(Ticks(3).as_millis(100), 30);
        assert_eq!(Ticks(1).as_millis(1000), 1);
    }
}
