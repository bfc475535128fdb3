//! # Condition Variable
//!
//! Condvar POSIX sobre um kernel de tempo real que só oferece notificação
//! de slot único por task.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Registro de Espera:** Um conjunto limitado de slots (`WaiterSet`)
//!   guarda as tasks bloqueadas. Sem slot livre, `wait` falha na hora.
//! - **Seleção por Prioridade:** `signal` acorda a task de maior prioridade
//!   atual; `broadcast` acorda todas.
//! - **Prazos:** `timed_wait` converte o prazo absoluto em ticks e bloqueia
//!   na notificação da própria task.
//!
//! ## 🏗️ Sem Wakeup Perdido
//!
//! ```text
//! wait:   [CS: registra slot] → unlock(mutex) → notify_wait → lock(mutex) → [CS: limpa slot]
//! signal:          [CS: escolhe slot, notify, limpa]
//! ```
//!
//! A task entra no conjunto ANTES de soltar o mutex. Qualquer `signal` que
//! rode depois disso a encontra, e a notificação fica travada no kernel até
//! o `notify_wait`, mesmo que chegue antes dele.
//!
//! ## ⚠️ Obrigações do Chamador
//! - A notificação por task é compartilhada: um `signal` que chega logo após
//!   um timeout fica pendente e pode causar um wakeup espúrio na próxima
//!   espera da task. POSIX permite wakeups espúrios; reavalie o predicado.
//! - `init` e `destroy` exigem `&mut self`, então não podem concorrer com
//!   tasks em espera.

mod attr;
mod error;
mod waiters;

pub use attr::CondAttr;
pub use error::{status, CondError, CondResult};
pub(crate) use waiters::WaiterSet;
#[cfg(test)]
pub(crate) use waiters::{first_empty, highest_priority, position_of};

use spin::Once;

use crate::hal::{KernelPort, NotifyOutcome, RawMutex};
use crate::sync::critical::{CriticalSection, SchedulerSuspend};
use crate::time::{ticks, TimeSpec, Ticks};

/// Condition Variable
///
/// Pode ser criada em `static` (`CondVar::new` é `const`) e materializada no
/// primeiro uso, ou inicializada de forma eager com `init`.
pub struct CondVar<'a, P: KernelPort> {
    port: &'a P,
    attr: CondAttr,
    waiters: Once<WaiterSet<'a, P>>,
}

impl<'a, P: KernelPort> CondVar<'a, P> {
    /// Equivalente a PTHREAD_COND_INITIALIZER
    pub const fn new(port: &'a P) -> Self {
        Self::with_attr(port, CondAttr::new())
    }

    pub const fn with_attr(port: &'a P, attr: CondAttr) -> Self {
        Self {
            port,
            attr,
            waiters: Once::new(),
        }
    }

    /// Inicialização explícita (pthread_cond_init).
    ///
    /// Um estado anterior é descartado sem verificação; os slots antigos são
    /// liberados antes da nova alocação.
    pub fn init(&mut self, attr: CondAttr) -> CondResult<()> {
        self.attr = attr;
        self.waiters = Once::new();

        let set = WaiterSet::allocate(self.port, attr.capacity())?;
        self.waiters = Once::initialized(set);
        crate::kdebug!("(Cond) Init, capacidade=", attr.capacity());
        Ok(())
    }

    /// Libera os slots (pthread_cond_destroy).
    ///
    /// Depois disso a condvar volta ao estado não inicializado e pode ser
    /// reutilizada. Um segundo `destroy` não faz nada.
    pub fn destroy(&mut self) -> CondResult<()> {
        let waiters = core::mem::replace(&mut self.waiters, Once::new());
        if let Some(set) = waiters.try_into_inner() {
            crate::kdebug!("(Cond) Destroy, capacidade=", set.capacity());
            drop(set);
        }
        Ok(())
    }

    /// Bloqueia até `signal`/`broadcast` (pthread_cond_wait).
    ///
    /// `mutex` deve estar travado pela task chamadora; é solto durante a
    /// espera e readquirido antes do retorno.
    pub fn wait<M: RawMutex>(&self, mutex: &M) -> CondResult<()> {
        self.block_on(mutex, None)
    }

    /// Como `wait`, mas desiste em `deadline` (pthread_cond_timedwait).
    ///
    /// O prazo é absoluto, medido no relógio de `CondAttr::clock`. Um prazo
    /// já passado retorna `DeadlineExceeded` quase imediatamente. Em timeout
    /// o mutex também é readquirido.
    pub fn timed_wait<M: RawMutex>(&self, mutex: &M, deadline: &TimeSpec) -> CondResult<()> {
        self.block_on(mutex, Some(deadline))
    }

    /// Acorda a task de maior prioridade em espera (pthread_cond_signal).
    pub fn signal(&self) -> CondResult<()> {
        let waiters = self.waiters()?;

        let mut cs = CriticalSection::enter(self.port);
        if let Some(task) = waiters.take_highest(&mut cs) {
            self.port.notify(task);
            crate::ktrace!("(Cond) Signal entregue");
        }
        Ok(())
    }

    /// Acorda todas as tasks em espera (pthread_cond_broadcast).
    pub fn broadcast(&self) -> CondResult<()> {
        let waiters = self.waiters()?;

        let mut cs = CriticalSection::enter(self.port);
        let _woken = waiters.drain(&mut cs, |task| self.port.notify(task));
        drop(cs);

        crate::ktrace!("(Cond) Broadcast, acordadas=", _woken);
        Ok(())
    }

    /// Atributos em uso
    pub fn attr(&self) -> &CondAttr {
        &self.attr
    }

    /// Número máximo de tasks bloqueadas simultaneamente
    pub fn waiter_capacity(&self) -> usize {
        self.attr.capacity()
    }

    /// `true` depois que os slots foram alocados
    pub fn is_initialized(&self) -> bool {
        self.waiters.is_completed()
    }

    /// Tasks registradas no momento (0 se ainda não materializada)
    pub fn waiter_count(&self) -> usize {
        match self.waiters.get() {
            Some(waiters) => {
                let mut cs = CriticalSection::enter(self.port);
                waiters.occupied(&mut cs)
            }
            None => 0,
        }
    }

    /// Garante os slots alocados. Caminho rápido sem regiões críticas;
    /// a alocação roda uma única vez, com o scheduler suspenso.
    fn waiters(&self) -> CondResult<&WaiterSet<'a, P>> {
        if let Some(waiters) = self.waiters.get() {
            return Ok(waiters);
        }

        // Suspender ANTES de reivindicar o Once: com o scheduler congelado,
        // nenhuma task mais prioritária pode girar nele enquanto alocamos.
        let _suspend = SchedulerSuspend::enter(self.port);
        self.waiters.try_call_once(|| {
            crate::kdebug!("(Cond) Materializando slots, capacidade=", self.attr.capacity());
            WaiterSet::allocate(self.port, self.attr.capacity())
        })
    }

    /// Atraso em ticks até `deadline` no relógio configurado.
    fn delay_until(&self, deadline: &TimeSpec) -> CondResult<Ticks> {
        let now = self.port.clock_now(self.attr.clock()).map_err(|_| {
            crate::kwarn!("(Cond) Relógio ilegível");
            CondError::InvalidTime
        })?;

        ticks::delay_until(deadline, &now, self.port.tick_rate_hz()).map_err(|_| CondError::InvalidTime)
    }

    fn block_on<M: RawMutex>(&self, mutex: &M, deadline: Option<&TimeSpec>) -> CondResult<()> {
        let waiters = self.waiters()?;

        let delay = match deadline {
            Some(deadline) => self.delay_until(deadline)?,
            None => Ticks::FOREVER,
        };

        let me = self.port.current_task();

        // 1. Registrar ANTES de soltar o mutex
        {
            let mut cs = CriticalSection::enter(self.port);
            if !waiters.insert(&mut cs, me) {
                drop(cs);
                crate::kwarn!("(Cond) Sem slot livre, capacidade=", waiters.capacity());
                return Err(CondError::ResourceExhausted);
            }
        }

        // 2. Soltar o mutex (fora de qualquer seção crítica)
        if let Err(errno) = mutex.unlock() {
            let mut cs = CriticalSection::enter(self.port);
            waiters.remove(&mut cs, me);
            return Err(CondError::Mutex(errno));
        }

        // 3. Bloquear na notificação da própria task
        let outcome = self.port.notify_wait(delay);

        // 4. Readquirir o mutex em qualquer desfecho
        let relock = mutex.lock();

        // 5. Limpar o próprio slot (no-op se signal/broadcast já limpou)
        {
            let mut cs = CriticalSection::enter(self.port);
            waiters.remove(&mut cs, me);
        }

        match outcome {
            NotifyOutcome::Notified => relock.map_err(CondError::Mutex),
            NotifyOutcome::TimedOut => {
                crate::ktrace!("(Cond) Timeout, ticks=", delay.0);
                Err(CondError::DeadlineExceeded)
            }
        }
    }
}
