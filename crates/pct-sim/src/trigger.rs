//! Recurring tick trigger.
//!
//! The orchestrator never blocks or sleeps. It asks its trigger to fire
//! once after a delay and re-arms after every tick while a run is active.
//! The host event loop owns the clock: it polls the trigger and invokes
//! [`Simulation::tick`](crate::Simulation::tick) when it is due.
//!
//! Late firing is tolerated. The next deadline is measured from the moment
//! the trigger is re-armed, not from the missed deadline, and logical time
//! always advances by exactly one step per tick.

use std::time::{Duration, Instant};

/// "Call me back after `delay`" primitive supplied by the host.
pub trait TickTrigger {
    /// Schedule a single firing after `delay`, replacing any pending one.
    fn arm(&mut self, delay: Duration);

    /// Drop the pending firing, if any.
    fn cancel(&mut self);

    /// Whether a firing is pending.
    fn is_armed(&self) -> bool;
}

/// Single-deadline trigger for polling event loops.
#[derive(Debug, Clone, Default)]
pub struct DeadlineTrigger {
    deadline: Option<Instant>,
}

impl DeadlineTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending firing if its deadline has passed.
    ///
    /// Returns `true` at most once per `arm`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending firing, zero if overdue.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl TickTrigger for DeadlineTrigger {
    fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
