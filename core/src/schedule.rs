use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::Generation;

/// Session clock resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// How long a mismatched pair stays face up.
pub const FLIP_BACK_DELAY: Duration = Duration::from_millis(1000);

/// Deferred work the controller asks its host to run later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    Tick(Generation),
    FlipBack(Generation),
}

/// Host timer facility. Fired tasks are handed back through
/// [`GameController::run`](crate::GameController::run).
pub trait Scheduler {
    type Handle;

    fn schedule_repeating(&mut self, period: Duration, task: Task) -> Self::Handle;

    fn schedule_once(&mut self, delay: Duration, task: Task) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Entry {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
    task: Task,
}

/// Virtual-clock scheduler: nothing fires until [`advance`](Self::advance).
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Moves the clock forward, returning every task that came due in firing
    /// order. Repeating tasks fire once per elapsed period.
    pub fn advance(&mut self, by: Duration) -> Vec<Task> {
        let target = self.now + by;
        let mut fired = Vec::new();

        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due <= target)
                .min_by_key(|(_, entry)| (entry.due, entry.id.0))
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };

            let entry = &mut self.entries[index];
            self.now = entry.due;
            fired.push(entry.task);
            if let Some(period) = entry.period {
                entry.due += period;
            } else {
                self.entries.swap_remove(index);
            }
        }

        self.now = target;
        fired
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            task,
        });
        id
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TaskId;

    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TaskId {
        let period = if period.is_zero() {
            log::warn!("zero repeat period requested, using 1ms");
            Duration::from_millis(1)
        } else {
            period
        };
        self.push(period, Some(period), task)
    }

    fn schedule_once(&mut self, delay: Duration, task: Task) -> TaskId {
        self.push(delay, None, task)
    }

    fn cancel(&mut self, handle: TaskId) {
        self.entries.retain(|entry| entry.id != handle);
    }
}
