//! # Standard Error Codes (Errno)
//!
//! Define os códigos de erro retornados pelas primitivas POSIX.
//! Baseado no padrão POSIX/Linux para compatibilidade com ferramentas existentes.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Uniformidade:** Todas as operações `pthread_cond_*` retornam códigos padronizados.
//! - **Conversion:** Métodos `as_i32`/`as_isize` facilitam o retorno para chamadores C.
//!
//! ## ⚠️ Pontos de Atenção
//! - `ENOMEM` não faz parte da lista oficial de `pthread_cond_timedwait`, mas a
//!   especificação só proíbe `EINTR`. Usamos `ENOMEM` para falta de slots.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    Success = 0,
    EPERM = 1,      // Operation not permitted
    ENOMEM = 12,    // Out of memory
    EBUSY = 16,     // Device or resource busy
    EINVAL = 22,    // Invalid argument
    EDEADLK = 35,   // Resource deadlock would occur
    ETIMEDOUT = 110, // Connection timed out
}

impl Errno {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }

    /// Converte um código numérico de volta para `Errno`.
    pub fn from_i32(code: i32) -> Option<Self> {
        let errno = match code {
            0 => Self::Success,
            1 => Self::EPERM,
            12 => Self::ENOMEM,
            16 => Self::EBUSY,
            22 => Self::EINVAL,
            35 => Self::EDEADLK,
            110 => Self::ETIMEDOUT,
            _ => return None,
        };
        Some(errno)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "sucesso",
            Self::EPERM => "operação não permitida",
            Self::ENOMEM => "memória insuficiente",
            Self::EBUSY => "recurso ocupado",
            Self::EINVAL => "argumento inválido",
            Self::EDEADLK => "deadlock detectado",
            Self::ETIMEDOUT => "tempo esgotado",
        }
    }
}

impl core::fmt::Display for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::Errno;

    #[test]
    fn codes_round_trip_through_i32() {
        for errno in [Errno::ENOMEM, Errno::EINVAL, Errno::ETIMEDOUT, Errno::EPERM] {
            assert_eq!(Errno::from_i32(errno.as_i32()), Some(errno));
        }
        assert_eq!(Errno::from_i32(9999), None);
        // Só os códigos que as condvars e o SpinMutex produzem
        for foreign in [4, 11, 75] {
            assert_eq!(Errno::from_i32(foreign), None);
        }
    }

    #[test]
    fn isize_is_negated_for_syscall_returns() {
        assert_eq!(Errno::ETIMEDOUT.as_isize(), -110);
        assert_eq!(Errno::Success.as_isize(), 0);
    }
}
