//! Guards de região crítica
//!
//! Duas granularidades, deliberadamente distintas:
//!
//! ```text
//! SchedulerSuspend → congela o scheduler inteiro; longo, raro (alocação única)
//! CriticalSection  → preempção/IRQs desligadas; curto, O(capacidade)
//! ```
//!
//! Ambos liberam a região no `Drop`, inclusive em retornos antecipados.

use crate::hal::KernelPort;

/// Seção crítica de task - libera ao sair do escopo
///
/// # Quando usar
///
/// - Toda leitura/escrita dos slots de espera
/// - Nunca em volta de alocação ou de chamadas que bloqueiam
pub struct CriticalSection<'a, P: KernelPort> {
    port: &'a P,
}

impl<'a, P: KernelPort> CriticalSection<'a, P> {
    #[inline]
    pub fn enter(port: &'a P) -> Self {
        port.enter_critical();
        Self { port }
    }
}

impl<P: KernelPort> Drop for CriticalSection<'_, P> {
    #[inline]
    fn drop(&mut self) {
        self.port.exit_critical();
    }
}

/// Scheduler suspenso - retoma ao sair do escopo
///
/// Interrupções continuam ativas; apenas a troca de tasks é congelada.
pub struct SchedulerSuspend<'a, P: KernelPort> {
    port: &'a P,
}

impl<'a, P: KernelPort> SchedulerSuspend<'a, P> {
    #[inline]
    pub fn enter(port: &'a P) -> Self {
        port.suspend_all();
        Self { port }
    }
}

impl<P: KernelPort> Drop for SchedulerSuspend<'_, P> {
    #[inline]
    fn drop(&mut self) {
        self.port.resume_all();
    }
}
