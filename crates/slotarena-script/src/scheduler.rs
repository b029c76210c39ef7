//! Turning script offsets into waits.

use std::thread;
use std::time::{Duration, Instant};

/// Decides how long to wait before each step of a script runs.
///
/// The runner calls [`start`](Scheduler::start) once per run, then
/// [`wait_until`](Scheduler::wait_until) with each step's offset from the
/// start, in non-decreasing order.
pub trait Scheduler {
    /// Mark the start of a run.
    fn start(&mut self);

    /// Return once `offset` has elapsed since [`start`](Scheduler::start).
    fn wait_until(&mut self, offset: Duration);
}

/// Runs every step back to back on a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct ImmediateScheduler {
    now: Duration,
}

impl ImmediateScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time reached so far in the current run.
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for ImmediateScheduler {
    fn start(&mut self) {
        self.now = Duration::ZERO;
    }

    fn wait_until(&mut self, offset: Duration) {
        self.now = self.now.max(offset);
    }
}

/// Sleeps the calling thread until each step is due.
#[derive(Clone, Debug, Default)]
pub struct SleepScheduler {
    started: Option<Instant>,
}

impl SleepScheduler {
    /// Create a scheduler; the clock starts on the first run.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SleepScheduler {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn wait_until(&mut self, offset: Duration) {
        let started = *self.started.get_or_insert_with(Instant::now);
        let remaining = offset.saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_clock_only_moves_forward() {
        let mut s = ImmediateScheduler::new();
        s.start();
        s.wait_until(Duration::from_millis(300));
        s.wait_until(Duration::from_millis(100));
        assert_eq!(s.now(), Duration::from_millis(300));
        s.start();
        assert_eq!(s.now(), Duration::ZERO);
    }

    #[test]
    fn sleep_scheduler_waits_at_least_offset() {
        let mut s = SleepScheduler::new();
        let t0 = Instant::now();
        s.start();
        s.wait_until(Duration::from_millis(5));
        assert!(t0.elapsed() >= Duration::from_millis(5));
    }
}
