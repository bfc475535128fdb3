//! Tipos de Erro das Condition Variables

use crate::sys::Errno;

/// Erros de `init`, `wait`, `timed_wait`, `signal` e `broadcast`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondError {
    /// Falha ao alocar os slots, ou nenhum slot livre no `wait`
    ResourceExhausted,
    /// Prazo malformado ou relógio ilegível; nada foi alterado
    InvalidTime,
    /// O prazo expirou; o mutex já foi readquirido e o slot limpo
    DeadlineExceeded,
    /// O mutex externo falhou no unlock/lock
    Mutex(Errno),
}

impl CondError {
    /// Código POSIX equivalente
    pub fn errno(&self) -> Errno {
        match self {
            Self::ResourceExhausted => Errno::ENOMEM,
            Self::InvalidTime => Errno::EINVAL,
            Self::DeadlineExceeded => Errno::ETIMEDOUT,
            Self::Mutex(errno) => *errno,
        }
    }

    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceExhausted => "sem memória ou sem slot de espera",
            Self::InvalidTime => "prazo inválido ou relógio indisponível",
            Self::DeadlineExceeded => "prazo expirado",
            Self::Mutex(_) => "falha no mutex associado",
        }
    }
}

impl core::fmt::Display for CondError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Mutex(errno) => write!(f, "{}: {}", self.as_str(), errno),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

/// Tipo Result específico das condvars
pub type CondResult<T> = Result<T, CondError>;

/// Converte um resultado para o código de status estilo `pthread_cond_*`
/// (0 em sucesso).
pub fn status(result: CondResult<()>) -> i32 {
    match result {
        Ok(()) => Errno::Success.as_i32(),
        Err(err) => err.errno().as_i32(),
    }
}
