//! Forwarding events to a presentation thread.

use crossbeam_channel::{Receiver, Sender};
use slotarena_core::{ArenaEvent, EventSink};

/// Sends every recorded event down a crossbeam channel.
///
/// The arena keeps running if the receiving side goes away; the sink
/// notes the disconnect and stops sending.
pub struct ChannelSink {
    tx: Sender<ArenaEvent>,
    disconnected: bool,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<ArenaEvent>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }

    /// Create a sink with a fresh unbounded channel, returning the receiver.
    pub fn unbounded() -> (Self, Receiver<ArenaEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    /// Whether the receiver has been dropped.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl EventSink for ChannelSink {
    fn record(&mut self, event: ArenaEvent) {
        if self.disconnected {
            return;
        }
        if self.tx.send(event).is_err() {
            self.disconnected = true;
        }
    }
}
