//! Tempo: Relógios e Ticks
//!
//! Converte prazos absolutos (`TimeSpec`) para atrasos relativos em ticks do
//! scheduler, o único formato de timeout que o kernel entende.

pub mod clock;
pub mod ticks;

pub use clock::{ClockError, ClockId, TimeSpec};
pub use ticks::Ticks;
