//! Traits do HAL
//!
//! Define as interfaces abstratas consumidas pelo núcleo das condvars.

pub mod kernel;
pub mod mutex;

pub use kernel::*;
pub use mutex::*;
