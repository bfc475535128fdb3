//! Conjunto limitado de tasks em espera
//!
//! Arena de `capacity` slots, alocada uma vez. Cada slot está vazio ou guarda
//! o handle de uma task. NÃO é uma fila: o "primeiro" slot é o primeiro
//! encontrado na varredura, não o mais antigo.
//!
//! Todo acesso exige um `CriticalSection` emprestado mutavelmente; wait,
//! signal e broadcast nunca alocam.

use core::alloc::Layout;
use core::ptr::NonNull;

use super::error::{CondError, CondResult};
use crate::hal::{KernelPort, Priority};
use crate::sync::critical::CriticalSection;

// =============================================================================
// SELEÇÃO SOBRE SLOTS
// =============================================================================

/// Índice do primeiro slot vazio
pub(crate) fn first_empty<T>(slots: &[Option<T>]) -> Option<usize> {
    slots.iter().position(Option::is_none)
}

/// Índice do slot ocupado por `task`
pub(crate) fn position_of<T: PartialEq>(slots: &[Option<T>], task: &T) -> Option<usize> {
    slots.iter().position(|slot| slot.as_ref() == Some(task))
}

/// Arg-max por prioridade sobre os slots ocupados.
///
/// Empate: vence o primeiro na ordem de varredura. POSIX não define ordem
/// entre tasks de mesma prioridade, e ninguém deve depender desta.
pub(crate) fn highest_priority<T: Copy>(slots: &[Option<T>], priority_of: impl Fn(T) -> Priority) -> Option<usize> {
    let mut best: Option<(usize, Priority)> = None;

    for (index, slot) in slots.iter().enumerate() {
        let Some(task) = *slot else { continue };
        let priority = priority_of(task);
        match best {
            Some((_, current)) if current >= priority => {}
            _ => best = Some((index, priority)),
        }
    }

    best.map(|(index, _)| index)
}

// =============================================================================
// ARENA DE SLOTS
// =============================================================================

/// Slots de espera de uma condvar
pub(crate) struct WaiterSet<'a, P: KernelPort> {
    port: &'a P,
    slots: NonNull<Option<P::Task>>,
    capacity: usize,
}

// SAFETY: os slots só são tocados dentro de uma CriticalSection, que exclui
// qualquer outra task durante o acesso.
unsafe impl<P: KernelPort> Send for WaiterSet<'_, P> {}
unsafe impl<P: KernelPort> Sync for WaiterSet<'_, P> {}

impl<'a, P: KernelPort> WaiterSet<'a, P> {
    /// Aloca e zera `capacity` slots.
    ///
    /// Deve rodar fora de seção crítica (a alocação pode demorar).
    pub(crate) fn allocate(port: &'a P, capacity: usize) -> CondResult<Self> {
        if capacity == 0 {
            crate::kwarn!("(Cond) Capacidade zero, nada a alocar");
            return Err(CondError::ResourceExhausted);
        }

        let layout = Self::layout(capacity)?;
        let Some(raw) = port.allocate(layout) else {
            crate::kwarn!("(Cond) Falha ao alocar slots, capacidade=", capacity);
            return Err(CondError::ResourceExhausted);
        };

        let slots = raw.cast::<Option<P::Task>>();
        for i in 0..capacity {
            // SAFETY: `raw` cobre `capacity` elementos alinhados.
            unsafe { slots.as_ptr().add(i).write(None) };
        }

        Ok(Self { port, slots, capacity })
    }

    fn layout(capacity: usize) -> CondResult<Layout> {
        Layout::array::<Option<P::Task>>(capacity).map_err(|_| CondError::ResourceExhausted)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Visão mutável dos slots, válida enquanto a seção crítica durar.
    fn slots_mut<'g>(&'g self, _cs: &'g mut CriticalSection<'_, P>) -> &'g mut [Option<P::Task>] {
        // SAFETY: a seção crítica impede acesso concorrente, e o empréstimo
        // mutável do guard impede duas visões vivas a partir dele.
        unsafe { core::slice::from_raw_parts_mut(self.slots.as_ptr(), self.capacity) }
    }

    /// Ocupa o primeiro slot vazio. `false` se não houver nenhum.
    pub(crate) fn insert(&self, cs: &mut CriticalSection<'_, P>, task: P::Task) -> bool {
        let slots = self.slots_mut(cs);
        match first_empty(slots) {
            Some(index) => {
                slots[index] = Some(task);
                true
            }
            None => false,
        }
    }

    /// Limpa o slot de `task`. `false` se ela já tinha sido removida.
    pub(crate) fn remove(&self, cs: &mut CriticalSection<'_, P>, task: P::Task) -> bool {
        let slots = self.slots_mut(cs);
        match position_of(slots, &task) {
            Some(index) => {
                slots[index] = None;
                true
            }
            None => false,
        }
    }

    /// Retira a task de maior prioridade atual.
    pub(crate) fn take_highest(&self, cs: &mut CriticalSection<'_, P>) -> Option<P::Task> {
        let port = self.port;
        let slots = self.slots_mut(cs);
        let index = highest_priority(slots, |task| port.task_priority(task))?;
        slots[index].take()
    }

    /// Esvazia todos os slots, entregando cada task a `f`.
    ///
    /// O slot já está vazio quando `f` roda, e nenhuma visão dos slots fica
    /// viva durante a chamada.
    pub(crate) fn drain(&self, cs: &mut CriticalSection<'_, P>, mut f: impl FnMut(P::Task)) -> usize {
        let mut count = 0;
        for index in 0..self.capacity {
            let Some(task) = self.slots_mut(cs)[index].take() else { continue };
            f(task);
            count += 1;
        }
        count
    }

    /// Número de slots ocupados
    pub(crate) fn occupied(&self, cs: &mut CriticalSection<'_, P>) -> usize {
        self.slots_mut(cs).iter().filter(|slot| slot.is_some()).count()
    }
}

impl<P: KernelPort> Drop for WaiterSet<'_, P> {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.capacity) {
            // SAFETY: `slots` veio de `port.allocate` com este mesmo layout e
            // só é liberado aqui, uma única vez.
            unsafe { self.port.deallocate(self.slots.cast::<u8>(), layout) };
        }
    }
}
