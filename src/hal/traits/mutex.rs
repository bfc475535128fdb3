//! Interface do Mutex consumido por `wait`/`timed_wait`.

use crate::sys::Errno;

/// Mutex externo com retornos no estilo POSIX.
///
/// A condvar não conhece o dado protegido; ela apenas solta o lock depois de
/// registrar a task e o readquire antes de retornar.
pub trait RawMutex {
    /// Adquire o lock (pode bloquear)
    fn lock(&self) -> Result<(), Errno>;

    /// Libera o lock
    fn unlock(&self) -> Result<(), Errno>;
}

impl<M: RawMutex + ?Sized> RawMutex for &M {
    fn lock(&self) -> Result<(), Errno> {
        (**self).lock()
    }

    fn unlock(&self) -> Result<(), Errno> {
        (**self).unlock()
    }
}
