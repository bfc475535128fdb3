//! Kernel simulado no host (apenas testes)
//!
//! Cada thread do host faz o papel de uma task. A notificação por task é um
//! slot `bool` travado (latched) com `std::sync::Condvar`, a seção crítica e a
//! suspensão do scheduler são spinlocks globais do kernel simulado, e 1 tick
//! vale 1ms. A seção crítica aninha por thread, como taskENTER_CRITICAL.

use core::alloc::Layout;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};

use std::boxed::Box;
use std::cell::Cell;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use std::vec::Vec;

use crate::hal::{KernelPort, NotifyOutcome, Priority};
use crate::mm::WaiterPool;
use crate::time::{ClockError, ClockId, TimeSpec, Ticks};

/// Handle de task simulada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub usize);

struct NotifySlot {
    pending: Mutex<bool>,
    wake: Condvar,
}

struct TaskRecord {
    priority: AtomicU8,
    slot: NotifySlot,
}

/// Contadores observáveis pelos testes
#[derive(Default)]
pub struct SimStats {
    pub critical_enters: AtomicUsize,
    pub critical_exits: AtomicUsize,
    pub suspends: AtomicUsize,
    pub resumes: AtomicUsize,
    pub allocations: AtomicUsize,
    pub frees: AtomicUsize,
    /// Esperas que encontraram a notificação já pendente
    pub early_notifications: AtomicUsize,
    /// `suspend_all` que pararam antes de congelar o scheduler
    pub stalled_suspends: AtomicUsize,
}

std::thread_local! {
    static CURRENT: Cell<Option<TaskId>> = const { Cell::new(None) };
    static CRITICAL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

pub struct SimKernel {
    tasks: Mutex<Vec<Arc<TaskRecord>>>,
    critical: spin::Mutex<()>,
    scheduler: spin::Mutex<()>,
    pool: WaiterPool,
    boot: Instant,
    clock_fails: AtomicBool,
    alloc_fails: AtomicBool,
    pre_block_delay_ms: AtomicU64,
    suspend_stall_ms: AtomicU64,
    pub stats: SimStats,
}

impl SimKernel {
    pub fn new() -> Self {
        let arena = Box::leak(std::vec![MaybeUninit::<u8>::uninit(); 64 * 1024].into_boxed_slice());
        Self {
            tasks: Mutex::new(Vec::new()),
            critical: spin::Mutex::new(()),
            scheduler: spin::Mutex::new(()),
            pool: WaiterPool::from_static(arena),
            boot: Instant::now(),
            clock_fails: AtomicBool::new(false),
            alloc_fails: AtomicBool::new(false),
            pre_block_delay_ms: AtomicU64::new(0),
            suspend_stall_ms: AtomicU64::new(0),
            stats: SimStats::default(),
        }
    }

    /// Registra a thread atual como task com a prioridade dada.
    pub fn spawn_task(&self, priority: u8) -> TaskId {
        let record = Arc::new(TaskRecord {
            priority: AtomicU8::new(priority),
            slot: NotifySlot {
                pending: Mutex::new(false),
                wake: Condvar::new(),
            },
        });

        let mut tasks = self.tasks.lock().unwrap();
        let id = TaskId(tasks.len());
        tasks.push(record);
        CURRENT.with(|current| current.set(Some(id)));
        id
    }

    pub fn set_priority(&self, task: TaskId, priority: u8) {
        self.record(task).priority.store(priority, Ordering::SeqCst);
    }

    pub fn fail_clock(&self, fails: bool) {
        self.clock_fails.store(fails, Ordering::SeqCst);
    }

    pub fn fail_allocations(&self, fails: bool) {
        self.alloc_fails.store(fails, Ordering::SeqCst);
    }

    /// Atraso antes de cada `notify_wait` olhar o slot, abrindo a janela
    /// entre o registro e o bloqueio.
    pub fn set_pre_block_delay(&self, millis: u64) {
        self.pre_block_delay_ms.store(millis, Ordering::SeqCst);
    }

    /// O próximo `suspend_all` dorme `millis` antes de congelar o scheduler,
    /// como uma task preemptada logo antes da suspensão valer.
    pub fn stall_next_suspend(&self, millis: u64) {
        self.suspend_stall_ms.store(millis, Ordering::SeqCst);
    }

    /// Notificação pendente para `task`?
    pub fn is_pending(&self, task: TaskId) -> bool {
        *self.record(task).slot.pending.lock().unwrap()
    }

    pub fn live_allocations(&self) -> usize {
        self.pool.live_allocations()
    }

    fn record(&self, task: TaskId) -> Arc<TaskRecord> {
        self.tasks.lock().unwrap()[task.0].clone()
    }
}

impl KernelPort for SimKernel {
    type Task = TaskId;

    fn suspend_all(&self) {
        let stall = self.suspend_stall_ms.swap(0, Ordering::SeqCst);
        if stall > 0 {
            self.stats.stalled_suspends.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(stall));
        }

        core::mem::forget(self.scheduler.lock());
        self.stats.suspends.fetch_add(1, Ordering::SeqCst);
    }

    fn resume_all(&self) {
        self.stats.resumes.fetch_add(1, Ordering::SeqCst);
        // SAFETY: pareado com o lock esquecido em `suspend_all`.
        unsafe { self.scheduler.force_unlock() };
    }

    fn enter_critical(&self) {
        let depth = CRITICAL_DEPTH.with(Cell::get);
        if depth == 0 {
            core::mem::forget(self.critical.lock());
        }
        CRITICAL_DEPTH.with(|cell| cell.set(depth + 1));
        self.stats.critical_enters.fetch_add(1, Ordering::SeqCst);
    }

    fn exit_critical(&self) {
        self.stats.critical_exits.fetch_add(1, Ordering::SeqCst);
        let depth = CRITICAL_DEPTH.with(Cell::get) - 1;
        CRITICAL_DEPTH.with(|cell| cell.set(depth));
        if depth == 0 {
            // SAFETY: pareado com o lock esquecido no `enter_critical` mais externo.
            unsafe { self.critical.force_unlock() };
        }
    }

    fn current_task(&self) -> TaskId {
        CURRENT
            .with(Cell::get)
            .expect("thread não registrada com spawn_task")
    }

    fn task_priority(&self, task: TaskId) -> Priority {
        Priority(self.record(task).priority.load(Ordering::SeqCst))
    }

    fn notify(&self, task: TaskId) {
        let record = self.record(task);
        let mut pending = record.slot.pending.lock().unwrap();
        *pending = true;
        record.slot.wake.notify_all();
    }

    fn notify_wait(&self, timeout: Ticks) -> NotifyOutcome {
        let record = self.record(self.current_task());

        let delay = self.pre_block_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }

        let mut pending = record.slot.pending.lock().unwrap();
        if *pending {
            self.stats.early_notifications.fetch_add(1, Ordering::SeqCst);
        }

        if timeout.is_forever() {
            while !*pending {
                pending = record.slot.wake.wait(pending).unwrap();
            }
        } else {
            let limit = Duration::from_millis(timeout.as_millis(self.tick_rate_hz()));
            let (guard, _) = record
                .slot
                .wake
                .wait_timeout_while(pending, limit, |pending| !*pending)
                .unwrap();
            pending = guard;
        }

        if *pending {
            *pending = false;
            NotifyOutcome::Notified
        } else {
            NotifyOutcome::TimedOut
        }
    }

    fn clock_now(&self, clock: ClockId) -> Result<TimeSpec, ClockError> {
        if self.clock_fails.load(Ordering::SeqCst) {
            return Err(ClockError);
        }

        let elapsed = match clock {
            ClockId::Realtime => SystemTime::now().duration_since(UNIX_EPOCH).map_err(|_| ClockError)?,
            ClockId::Monotonic => self.boot.elapsed(),
        };
        Ok(TimeSpec::new(elapsed.as_secs(), elapsed.subsec_nanos()))
    }

    fn tick_rate_hz(&self) -> u32 {
        crate::config::DEFAULT_TICK_RATE_HZ
    }

    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if self.alloc_fails.load(Ordering::SeqCst) {
            return None;
        }
        let ptr = self.pool.allocate(layout).ok()?;
        self.stats.allocations.fetch_add(1, Ordering::SeqCst);
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.frees.fetch_add(1, Ordering::SeqCst);
        self.pool.deallocate(ptr, layout);
    }
}

/// Instante realtime `millis` a partir de agora
pub fn realtime_in(kernel: &SimKernel, millis: u64) -> TimeSpec {
    let now = KernelPort::clock_now(kernel, ClockId::Realtime).unwrap();
    now.plus_millis(millis)
}

/// Instante realtime `millis` no passado
pub fn realtime_ago(kernel: &SimKernel, millis: u64) -> TimeSpec {
    let now = KernelPort::clock_now(kernel, ClockId::Realtime).unwrap();
    let nanos = now.as_nanos() - millis as u128 * 1_000_000;
    TimeSpec::new((nanos / 1_000_000_000) as u64, (nanos % 1_000_000_000) as u32)
}

/// Espera ativa (com limite) até `cond` valer.
pub fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    let start = Instant::now();
    while !cond() {
        assert!(start.elapsed() < Duration::from_secs(5), "timeout esperando: {}", what);
        std::thread::sleep(Duration::from_millis(1));
    }
}
