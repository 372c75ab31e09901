//! Timer scheduler
//!
//! Every delayed action in the spin cycle goes through here as a named,
//! one-shot, cancellable task keyed to the engine clock. Draining is explicit:
//! the engine pops due tasks each tick and acts on them, so there are no
//! hidden callbacks and a cancelled timer can never fire late.

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What a timer firing means to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Settling pause after the last reel stopped; fire evaluation
    Settle,
    /// Inter-spin delay elapsed; begin the next queued spin
    StartNextSpin,
    /// Feature entry transition finished; begin the first free spin
    FeatureEnterDone,
    /// Feature exit transition finished; hand control back
    FeatureExitDone,
}

#[derive(Debug)]
struct Entry {
    id: TimerId,
    due_ms: f64,
    task: TimerTask,
}

/// One-shot timer queue ordered by due time
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task to fire at `due_ms` on the engine clock
    pub fn schedule(&mut self, due_ms: f64, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms, task });
        log::trace!("scheduled {task:?} at {due_ms:.1}ms ({id:?})");
        id
    }

    /// Cancel a pending task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Cancel every pending instance of a task kind
    pub fn cancel_task(&mut self, task: TimerTask) {
        self.entries.retain(|e| e.task != task);
    }

    /// Pop every task due at or before `now_ms`, in due order.
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<TimerTask> {
        let mut due: Vec<Entry> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
