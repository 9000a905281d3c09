//! Cooperative tick scheduler.
//!
//! Host-side stand-in for the platform's cooperative scheduler. Every task
//! runs to completion on a single logical thread; a task that wants to run
//! again re-plans itself before returning. Callbacks never overlap, which is
//! what lets the application context go without locks.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Task table                           │
//! │                                                            │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐  │
//! │  │ Threshold │  │ TMP112    │  │ CO2       │  │ VOC     │  │
//! │  │ (1 s)     │  │ (2 s)     │  │ (60 s)    │  │ (5 s)   │  │
//! │  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └────┬────┘  │
//! │        │              │              │             │       │
//! │        ▼              ▼              ▼             ▼       │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │        run_pending() → TaskHandler::run_task()       │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

use heapless::Vec;
use log::{debug, trace};

use crate::app::ports::{TaskHandler, WakePort};

/// Milliseconds since boot.
pub type Tick = u64;

/// A task planned at `INFINITY` never runs until re-planned.
pub const INFINITY: Tick = Tick::MAX;

/// Maximum number of registered tasks (stack-allocated).
const MAX_TASKS: usize = 8;

/// Handle returned by [`Scheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u8);

impl TaskId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Internal bookkeeping for a registered task.
#[derive(Debug, Clone)]
struct TaskEntry {
    label: &'static str,
    /// Tick at which the task becomes due.
    next_run: Tick,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
///
/// Time only moves through [`advance_to`](Self::advance_to), so tests drive
/// it with simulated ticks and the runtime drives it from the monotonic
/// clock.
pub struct Scheduler {
    tasks: Vec<TaskEntry, MAX_TASKS>,
    /// Current time.
    now: Tick,
    /// Tick at which the running (or last run) task was dispatched.
    spin_tick: Tick,
    /// Task currently being dispatched.
    current: Option<TaskId>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            now: 0,
            spin_tick: 0,
            current: None,
        }
    }

    /// Register a task first due at `start`. Returns `None` if the table is
    /// full.
    pub fn register(&mut self, label: &'static str, start: Tick) -> Option<TaskId> {
        let id = TaskId(self.tasks.len() as u8);
        self.tasks
            .push(TaskEntry {
                label,
                next_run: start,
            })
            .ok()?;
        debug!("Scheduler: registered '{}' as task {} (due {})", label, id.0, start);
        Some(id)
    }

    /// Plan `task` to run at an absolute tick.
    pub fn plan_absolute(&mut self, task: TaskId, tick: Tick) {
        if let Some(entry) = self.tasks.get_mut(task.index()) {
            entry.next_run = tick;
        }
    }

    /// Re-plan the running task `delay_ms` after its own dispatch tick.
    ///
    /// Anchoring on the spin tick instead of `now` keeps a periodic task on
    /// its cadence no matter how long the task body took.
    pub fn plan_current_relative(&mut self, delay_ms: u64) {
        if let Some(task) = self.current {
            let at = self.spin_tick.saturating_add(delay_ms);
            self.plan_absolute(task, at);
        }
    }

    /// Tick at which the running task was dispatched.
    pub fn spin_tick(&self) -> Tick {
        self.spin_tick
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Move time forward. Going backwards is ignored.
    pub fn advance_to(&mut self, tick: Tick) {
        if tick > self.now {
            self.now = tick;
        }
    }

    /// Earliest planned tick across all tasks, or `None` if every task is
    /// parked at [`INFINITY`].
    pub fn next_wakeup(&self) -> Option<Tick> {
        self.tasks
            .iter()
            .map(|t| t.next_run)
            .filter(|&t| t != INFINITY)
            .min()
    }

    /// Take the next due task and mark it as running.
    ///
    /// The earliest planned task wins; ties go to the task registered first.
    /// The task is parked at [`INFINITY`] until it re-plans itself.
    pub fn next_due(&mut self) -> Option<TaskId> {
        let now = self.now;
        let (index, entry) = self
            .tasks
            .iter_mut()
            .enumerate()
            .filter(|(_, t)| t.next_run <= now)
            .min_by_key(|(i, t)| (t.next_run, *i))?;

        entry.next_run = INFINITY;
        let id = TaskId(index as u8);
        self.current = Some(id);
        self.spin_tick = now;
        trace!("Scheduler: dispatch '{}' at {}", entry.label, now);
        Some(id)
    }

    /// Dispatch every task due at the current time, including tasks woken
    /// by other tasks during this pass.
    pub fn run_pending(&mut self, handler: &mut impl TaskHandler) -> usize {
        let mut ran = 0;
        while let Some(task) = self.next_due() {
            handler.run_task(task, self);
            self.current = None;
            ran += 1;
        }
        ran
    }

    /// Planned tick of a task.
    pub fn planned(&self, task: TaskId) -> Option<Tick> {
        self.tasks.get(task.index()).map(|t| t.next_run)
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl WakePort for Scheduler {
    fn plan_now(&mut self, task: TaskId) {
        let now = self.now;
        self.plan_absolute(task, now);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
