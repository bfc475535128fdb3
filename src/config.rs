//! # Configuração de Build
//!
//! Constantes de tempo de compilação que dimensionam as condition variables
//! e o tempo do kernel de referência.

// =============================================================================
// CONDITION VARIABLES
// =============================================================================

/// Número máximo de tasks bloqueadas simultaneamente em uma condvar.
///
/// Cada instância aloca exatamente este número de slots (salvo override via
/// `CondAttr::with_capacity`). Exceder o limite é erro de recurso, não fila.
pub const COND_MAX_WAITERS: usize = 16;

// =============================================================================
// TEMPO
// =============================================================================

/// Frequência padrão do tick do scheduler (Ticks por segundo)
pub const DEFAULT_TICK_RATE_HZ: u32 = 1000;

/// Nanosegundos por segundo
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
