//! PCond - Condition Variables POSIX para o Redstone RTOS.
//!
//! Ponto central de exportação dos módulos.
//!
//! O scheduler, o mutex e o alocador são colaboradores externos, alcançados
//! apenas pelas traits de `hal`. Este crate implementa `init`, `destroy`,
//! `wait`, `timed_wait`, `signal` e `broadcast` sobre eles.

#![cfg_attr(not(test), no_std)]

// --- Infraestrutura ---
pub mod config; // Constantes de build
pub mod logging; // Logs zero-overhead
pub mod sys; // Códigos de erro POSIX

// --- Interfaces com o Kernel ---
pub mod hal; // KernelPort, RawMutex
pub mod mm; // Pool dos slots de espera
pub mod time; // Prazos e ticks

// --- Primitivas ---
pub mod sync; // CondVar e guards

pub use crate::hal::{KernelPort, NotifyOutcome, Priority, RawMutex};
pub use crate::sync::{CondAttr, CondError, CondResult, CondVar};
pub use crate::sys::Errno;
pub use crate::time::{ClockId, TimeSpec, Ticks};
