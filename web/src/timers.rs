use core::time::Duration;

use gloo::timers::callback::{Interval, Timeout};
use pexeso_core::{Scheduler, Task};
use yew::Callback;

pub(crate) enum TimerHandle {
    Interval(Interval),
    Timeout(Timeout),
}

/// Schedules controller tasks on browser timers; fired tasks are posted back
/// through `callback`.
pub(crate) struct WebScheduler {
    callback: Callback<Task>,
}

impl WebScheduler {
    pub(crate) fn new(callback: Callback<Task>) -> Self {
        Self { callback }
    }
}

fn as_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for WebScheduler {
    type Handle = TimerHandle;

    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TimerHandle {
        let callback = self.callback.clone();
        TimerHandle::Interval(Interval::new(as_millis(period), move || callback.emit(task)))
    }

    fn schedule_once(&mut self, delay: Duration, task: Task) -> TimerHandle {
        let callback = self.callback.clone();
        TimerHandle::Timeout(Timeout::new(as_millis(delay), move || callback.emit(task)))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        log::trace!("cancel timer");
        match handle {
            TimerHandle::Interval(interval) => drop(interval.cancel()),
            TimerHandle::Timeout(timeout) => drop(timeout.cancel()),
        }
    }
}
