//! One-shot timers that replace each other.
//!
//! A slot holds at most one pending callback. Scheduling again drops the
//! previous `Timeout`, which cancels it, so rapid repeats never stack.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;

#[derive(Default)]
pub struct TimerSlot {
    pending: RefCell<Option<Timeout>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, millis: u32, callback: impl FnOnce() + 'static) {
        let timeout = Timeout::new(millis, callback);
        // The old timeout is dropped after the borrow ends.
        let previous = self.pending.borrow_mut().replace(timeout);
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
    }
}
