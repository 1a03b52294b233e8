//! Wall clock and `setTimeout` scheduling for the notification queue.

use gloo_timers::callback::Timeout;

use dashboard_core::ports::{ScheduledTask, TimerHandle, TimerPort};

pub struct BrowserTimer;

impl BrowserTimer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserTimer {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingTimeout(Timeout);

impl ScheduledTask for PendingTimeout {
    fn cancel(self: Box<Self>) {
        // The closure handed back is never needed once the timeout is cleared.
        let _ = self.0.cancel();
    }
}

impl TimerPort for BrowserTimer {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TimerHandle {
        let millis = u32::try_from(delay_ms).unwrap_or(u32::MAX);
        TimerHandle::new(PendingTimeout(Timeout::new(millis, task)))
    }
}
