use std::time::{Duration, Instant};
use tracing::trace;

/// A one-shot deadline polled from the event loop.
///
/// Fires at most once. A cancelled timer never fires.
#[derive(Debug)]
pub struct OneShot {
    deadline: Instant,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

impl OneShot {
    pub fn schedule(now: Instant, delay: Duration) -> Self {
        trace!("Scheduling one-shot timer in {}ms", delay.as_millis());
        Self {
            deadline: now + delay,
            state: TimerState::Pending,
        }
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Pending && now >= self.deadline {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            trace!("Cancelled pending timer");
            self.state = TimerState::Cancelled;
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }
}
