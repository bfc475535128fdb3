//! Hardware/Kernel Abstraction Layer (HAL)
//!
//! Interfaces estreitas para os colaboradores externos das condvars:
//! o scheduler de tempo real (`KernelPort`) e o mutex (`RawMutex`).
//!
//! Nada aqui executa por conta própria; cada port (FreeRTOS, simulação de
//! host, etc.) fornece a implementação concreta.

pub mod traits;

#[cfg(test)]
pub mod sim;

pub use traits::*;
