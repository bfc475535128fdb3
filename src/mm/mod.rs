//! # Memory Management (MM)
//!
//! Memória para os slots de espera das condvars.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Pool Dedicado:** `WaiterPool` é uma arena fixa (linked list allocator)
//!   que um port pode usar para atender `KernelPort::allocate`, isolando as
//!   condvars do heap geral do kernel.
//! - **Falha Explícita:** Exaustão vira `MmError::OutOfMemory`, nunca panic.
//!
//! ## ⚠️ Pontos de Atenção
//! - A alocação acontece com o scheduler suspenso (não em seção crítica), por
//!   isso o pool usa um `spin::Mutex` e não desliga interrupções.

pub mod error;
pub mod pool;

#[cfg(test)]
mod test;

pub use error::{MmError, MmResult};
pub use pool::WaiterPool;
