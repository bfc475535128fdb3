//! Tipos de Erro do Subsistema de Memória
//!
//! Define erros estruturados para diagnóstico de falhas do pool.

/// Erros do subsistema de memória
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmError {
    /// Pool esgotado (OOM)
    OutOfMemory,
    /// Tamanho inválido (zero)
    InvalidSize,
    /// Pool usado antes de receber uma arena
    NotInitialized,
}

impl MmError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfMemory => "OOM: pool de slots esgotado",
            Self::InvalidSize => "Tamanho inválido",
            Self::NotInitialized => "Pool sem arena",
        }
    }
}

impl core::fmt::Display for MmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico para operações de memória
pub type MmResult<T> = Result<T, MmError>;
