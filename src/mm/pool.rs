//! Pool de memória para slots de espera.
//!
//! Arena de tamanho fixo gerenciada por `linked_list_allocator::Heap`.
//! Diferente do heap global, o pool pode esgotar de forma controlada, e a
//! condvar reporta `ResourceExhausted` em vez de abortar o sistema.

use core::alloc::Layout;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use linked_list_allocator::Heap;
use spin::Mutex;

use super::error::{MmError, MmResult};

/// Pool de memória para slots de espera
pub struct WaiterPool {
    heap: Mutex<Heap>,
    /// Alocações vivas (para diagnóstico)
    live: AtomicUsize,
}

impl WaiterPool {
    /// Cria pool vazio; toda alocação falha até `init`.
    pub fn empty() -> Self {
        Self {
            heap: Mutex::new(Heap::empty()),
            live: AtomicUsize::new(0),
        }
    }

    /// Cria pool sobre uma arena estática.
    pub fn from_static(arena: &'static mut [MaybeUninit<u8>]) -> Self {
        let pool = Self::empty();
        // SAFETY: a arena é 'static e exclusiva deste pool.
        unsafe { pool.init(arena.as_mut_ptr().cast::<u8>(), arena.len()) };
        pool
    }

    /// Entrega a arena ao pool.
    ///
    /// # Safety
    ///
    /// `bottom..bottom+size` deve ser memória válida, não usada por mais
    /// ninguém, viva enquanto o pool existir. Chamar apenas uma vez.
    pub unsafe fn init(&self, bottom: *mut u8, size: usize) {
        self.heap.lock().init(bottom, size);
        crate::kdebug!("(Pool) Arena entregue, bytes=", size);
    }

    /// Aloca um bloco.
    pub fn allocate(&self, layout: Layout) -> MmResult<NonNull<u8>> {
        if layout.size() == 0 {
            return Err(MmError::InvalidSize);
        }

        let mut heap = self.heap.lock();
        if heap.size() == 0 {
            return Err(MmError::NotInitialized);
        }

        match heap.allocate_first_fit(layout) {
            Ok(ptr) => {
                self.live.fetch_add(1, Ordering::Relaxed);
                Ok(ptr)
            }
            Err(()) => {
                crate::kwarn!("(Pool) Esgotado, pedido bytes=", layout.size());
                Err(MmError::OutOfMemory)
            }
        }
    }

    /// Devolve um bloco ao pool.
    ///
    /// # Safety
    ///
    /// `ptr` deve ter vindo de `allocate` deste pool com o mesmo `layout`.
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.heap.lock().deallocate(ptr, layout);
        self.live.fetch_sub(1, Ordering::Relaxed);
    }

    /// Número de blocos atualmente alocados
    pub fn live_allocations(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Bytes livres na arena
    pub fn free_bytes(&self) -> usize {
        self.heap.lock().free()
    }
}
