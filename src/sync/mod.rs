//! # Synchronization Primitives
//!
//! Condition variables POSIX e os guards de região que elas usam.
//!
//! ## Hierarquia de Uso
//!
//! ```text
//! SchedulerSuspend → Alocação única dos slots (scheduler congelado)
//! CriticalSection  → Toda leitura/escrita dos slots (curta, O(capacidade))
//! SpinMutex        → Mutex mínimo para ports simples e testes
//! CondVar          → Espera por condição, acorda por prioridade
//! ```
//!
//! ## Regras
//!
//! - **Nunca** alocar dentro de `CriticalSection`
//! - **Nunca** bloquear segurando qualquer uma das duas regiões

/// Guards de região crítica
pub mod critical;

/// Mutex por busy-wait
pub mod mutex;

/// Condition Variable
pub mod condvar;

#[cfg(test)]
mod test;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use condvar::{status, CondAttr, CondError, CondResult, CondVar};
pub use critical::{CriticalSection, SchedulerSuspend};
pub use mutex::SpinMutex;
