//! Interface Abstrata do Kernel de Tempo Real.
//!
//! O scheduler é um colaborador externo: criação de tasks, troca de contexto,
//! ordenação por prioridade e contagem de ticks acontecem do outro lado desta
//! fronteira. As condvars só precisam dos serviços listados aqui.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::time::{ClockError, ClockId, TimeSpec, Ticks};

/// Prioridade de escalonamento (maior = mais elegível)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u8);

/// Resultado de uma espera por notificação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Uma notificação estava pendente ou chegou antes do timeout
    Notified,
    /// O atraso expirou sem notificação
    TimedOut,
}

/// Serviços do scheduler consumidos pelas condvars.
///
/// # Regiões de exclusão
///
/// - `suspend_all`/`resume_all`: congela TODA troca de tasks. Usado apenas em
///   torno da alocação única dos slots (a alocação pode ser lenta demais para
///   rodar com interrupções desligadas).
/// - `enter_critical`/`exit_critical`: seção crítica curta (preempção e
///   interrupções desligadas). Usado em toda leitura/escrita dos slots.
///
/// Ambas devem ser pareadas; use os guards de `crate::sync::critical`.
pub trait KernelPort: Sync {
    /// Handle opaco de task (TaskHandle_t)
    type Task: Copy + Eq + Send + Sync;

    /// Suspende o scheduler inteiro (vTaskSuspendAll)
    fn suspend_all(&self);

    /// Retoma o scheduler (xTaskResumeAll)
    fn resume_all(&self);

    /// Entra na seção crítica de task (taskENTER_CRITICAL)
    fn enter_critical(&self);

    /// Sai da seção crítica de task (taskEXIT_CRITICAL)
    fn exit_critical(&self);

    /// Handle da task em execução
    fn current_task(&self) -> Self::Task;

    /// Prioridade atual de uma task (pode ter sido herdada)
    fn task_priority(&self, task: Self::Task) -> Priority;

    /// Entrega uma notificação à task. Fire-and-forget; idempotente se já
    /// houver uma pendente. Nunca bloqueia.
    fn notify(&self, task: Self::Task);

    /// Bloqueia a task atual até uma notificação ou até `timeout` expirar.
    ///
    /// Uma notificação entregue ANTES desta chamada fica travada (latched) e
    /// faz a espera retornar imediatamente com `Notified`.
    fn notify_wait(&self, timeout: Ticks) -> NotifyOutcome;

    /// Lê o relógio indicado
    fn clock_now(&self, clock: ClockId) -> Result<TimeSpec, ClockError>;

    /// Frequência do tick do scheduler
    fn tick_rate_hz(&self) -> u32;

    /// Aloca memória para os slots de espera. `None` em exaustão.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Libera memória obtida de `allocate`.
    ///
    /// # Safety
    ///
    /// `ptr` deve ter vindo de `allocate` com o mesmo `layout` e não pode ter
    /// sido liberado antes.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}
