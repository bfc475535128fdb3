//! # System Definitions
//!
//! Definições compartilhadas com a ABI POSIX (códigos de erro).

pub mod error;

pub use error::Errno;
