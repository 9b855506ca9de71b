use gloo::timers::callback::Timeout;
use shared::{Scheduler, TimerHandle};

/// Schedules callbacks on the browser's `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// Pending browser timeout. Dropping it clears the timeout.
pub struct BrowserTimer(Timeout);

impl TimerHandle for BrowserTimer {
    fn cancel(self) {
        drop(self.0);
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> BrowserTimer {
        BrowserTimer(Timeout::new(delay_ms, callback))
    }

    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
