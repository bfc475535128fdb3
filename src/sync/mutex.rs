//! Mutex mínimo compatível com `RawMutex`
//!
//! O mutex de produção vem do kernel; este existe para ports simples e para
//! os testes. Faz spin enquanto ocupado.
//!
//! # Diferença do mutex do kernel
//!
//! - Não tem dono nem herança de prioridade
//! - `unlock` sem lock retorna `EPERM` em vez de corromper o estado

use core::sync::atomic::{AtomicBool, Ordering};

use crate::hal::RawMutex;
use crate::sys::Errno;

/// Mutex por busy-wait
pub struct SpinMutex {
    /// Estado do lock
    locked: AtomicBool,
}

impl SpinMutex {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Tenta adquirir sem bloquear
    pub fn try_lock(&self) -> Result<(), Errno> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| ())
            .map_err(|_| Errno::EBUSY)
    }

    /// Estado atual (apenas diagnóstico; pode mudar logo em seguida)
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Default for SpinMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl RawMutex for SpinMutex {
    fn lock(&self) -> Result<(), Errno> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn unlock(&self) -> Result<(), Errno> {
        if self.locked.swap(false, Ordering::Release) {
            Ok(())
        } else {
            Err(Errno::EPERM)
        }
    }
}
