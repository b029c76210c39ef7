//! The observation seam between an arena and whatever renders it.

use crate::event::ArenaEvent;

/// Receives every event an arena emits, in emission order.
///
/// Implemented by log views, channels to presentation threads, and test
/// recorders. A sink is a pure consumer: it has no way to reach back
/// into the arena that feeds it.
pub trait EventSink {
    /// Record one event.
    fn record(&mut self, event: ArenaEvent);
}

/// A sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: ArenaEvent) {}
}

impl EventSink for Vec<ArenaEvent> {
    fn record(&mut self, event: ArenaEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: ArenaEvent) {
        (**self).record(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: ArenaEvent) {
        (**self).record(event);
    }
}
