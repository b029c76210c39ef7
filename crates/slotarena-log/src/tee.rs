//! Fan-out to two sinks.

use slotarena_core::{ArenaEvent, EventSink};

/// Records each event into `first`, then `second`.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B> {
    /// Receives every event first.
    pub first: A,
    /// Receives every event second.
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pair two sinks.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn record(&mut self, event: ArenaEvent) {
        self.first.record(event.clone());
        self.second.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventLog;

    #[test]
    fn both_sides_see_every_event() {
        let mut tee = Tee::new(EventLog::new(1), Vec::<ArenaEvent>::new());
        tee.record(ArenaEvent::RestoreRejected);
        tee.record(ArenaEvent::ReallocationRejected);
        assert_eq!(tee.first.len(), 1, "bounded side evicts");
        assert_eq!(tee.second.len(), 2);
        assert_eq!(tee.first.total_recorded(), 2);
    }
}
