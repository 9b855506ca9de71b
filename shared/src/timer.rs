//! Timer abstraction and the debounce primitive built on it.
//!
//! The page runs on a single-threaded event loop, so callbacks are plain
//! `FnOnce()` boxes and nothing here is `Send`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A scheduled callback that has not necessarily fired yet
pub trait TimerHandle {
    /// Prevent the callback from running. Cancelling a timer that already
    /// fired or was already cancelled does nothing.
    fn cancel(self);
}

/// Source of delayed callbacks and of the current time
pub trait Scheduler {
    type Handle: TimerHandle + 'static;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// Collapses bursts of calls into one delayed action.
///
/// Each `schedule` cancels whatever was pending on this debouncer, so only the
/// last action of a burst runs, `delay_ms` after the last call.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, delay_ms: u32, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(delay_ms, Box::new(action)));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct ManualState {
    now_ms: i64,
    next_seq: u64,
    // Keyed by (due time, sequence) so equal deadlines fire in schedule order.
    queue: BTreeMap<(i64, u64), Callback>,
}

/// Virtual clock scheduler. Time only moves when `advance` is called, which
/// makes timer-driven behavior deterministic under test.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

pub struct ManualTimer {
    key: (i64, u64),
    state: Rc<RefCell<ManualState>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        self.state.borrow_mut().queue.remove(&self.key);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: i64) -> Self {
        let scheduler = Self::default();
        scheduler.state.borrow_mut().now_ms = now_ms;
        scheduler
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Move the clock forward, firing every callback that falls due on the
    /// way, in deadline order. Callbacks may schedule further timers.
    pub fn advance(&self, delta_ms: i64) {
        let target = self.state.borrow().now_ms + delta_ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.queue.keys().next().copied() {
                    Some(key) if key.0 <= target => {
                        state.now_ms = key.0;
                        state.queue.remove(&key)
                    }
                    _ => {
                        state.now_ms = target;
                        None
                    }
                }
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut state = self.state.borrow_mut();
        let key = (state.now_ms + i64::from(delay_ms), state.next_seq);
        state.next_seq += 1;
        state.queue.insert(key, callback);
        ManualTimer {
            key,
            state: Rc::clone(&self.state),
        }
    }

    fn now_ms(&self) -> i64 {
        self.state.borrow().now_ms
    }
}
