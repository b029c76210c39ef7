//! Bounded, append-only event log.
//!
//! [`EventLog`] is a fixed-capacity FIFO of [`LogEntry`] values. When
//! full, each new entry evicts the oldest one. Sequence numbers are
//! monotonic over the log's whole lifetime, so a view can tell how many
//! entries scrolled away.

use std::collections::VecDeque;
use std::fmt;

use slotarena_core::{ArenaEvent, EventSink, Severity};

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Position in the overall event stream, starting at 0.
    pub seq: u64,
    /// Presentation severity of the event.
    pub severity: Severity,
    /// The event itself.
    pub event: ArenaEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.seq, self.severity, self.event)
    }
}

/// The most recent `capacity` events an arena emitted.
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    /// Monotonic count of every event ever recorded.
    recorded: u64,
}

impl EventLog {
    /// Default number of retained entries.
    pub const DEFAULT_CAPACITY: usize = 20;

    /// Create an empty log retaining at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`. A log that retains nothing cannot be
    /// rendered.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "EventLog capacity must be >= 1, got {capacity}");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            recorded: 0,
        }
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of events ever recorded, retained or not.
    pub fn total_recorded(&self) -> u64 {
        self.recorded
    }

    /// Number of entries dropped by FIFO eviction.
    pub fn evicted(&self) -> u64 {
        self.recorded - self.entries.len() as u64
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The most recently recorded entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Retained entries with the given severity, oldest first.
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().filter(move |e| e.severity == severity)
    }

    /// Retained events, oldest first, without their metadata.
    pub fn events(&self) -> impl Iterator<Item = &ArenaEvent> + '_ {
        self.entries.iter().map(|e| &e.event)
    }

    /// Drop all retained entries. Sequence numbering continues.
    /// Cleared entries count towards [`evicted`](Self::evicted).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: ArenaEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.recorded,
            severity: event.severity(),
            event,
        });
        self.recorded += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotarena_core::{BlockId, CheckpointMarker};

    fn freed(id: u64) -> ArenaEvent {
        ArenaEvent::Freed {
            slot_index: 0,
            id: BlockId(id),
        }
    }

    #[test]
    fn default_retains_twenty() {
        let log = EventLog::default();
        assert_eq!(log.capacity(), 20);
        assert!(log.is_empty());
    }

    #[test]
    fn records_severity_and_sequence() {
        let mut log = EventLog::new(4);
        log.record(freed(1));
        log.record(ArenaEvent::RestoreRejected);
        log.record(ArenaEvent::CheckpointDuplicate {
            marker: CheckpointMarker(1),
        });
        let sev: Vec<_> = log.entries().map(|e| (e.seq, e.severity)).collect();
        assert_eq!(
            sev,
            vec![
                (0, Severity::Info),
                (1, Severity::Error),
                (2, Severity::Annotation)
            ]
        );
        assert_eq!(log.by_severity(Severity::Error).count(), 1);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut log = EventLog::new(3);
        for id in 1..=5 {
            log.record(freed(id));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.total_recorded(), 5);
        assert_eq!(log.evicted(), 2);
        let kept: Vec<_> = log.entries().map(|e| e.seq).collect();
        assert_eq!(kept, vec![2, 3, 4]);
        assert_eq!(log.latest().unwrap().event, freed(5));
    }

    #[test]
    fn clear_keeps_sequence_running() {
        let mut log = EventLog::new(3);
        log.record(freed(1));
        log.clear();
        log.record(freed(2));
        assert_eq!(log.latest().unwrap().seq, 1);
        assert_eq!(log.evicted(), 1);
    }

    #[test]
    fn display_line() {
        let mut log = EventLog::new(2);
        log.record(ArenaEvent::RestoreRejected);
        assert_eq!(
            log.latest().unwrap().to_string(),
            "#0 [error] no checkpoints to restore"
        );
    }

    #[test]
    #[should_panic(expected = "capacity must be >= 1")]
    fn zero_capacity_panics() {
        let _ = EventLog::new(0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn retains_most_recent_window(cap in 1usize..32, n in 0u64..100) {
                let mut log = EventLog::new(cap);
                for id in 0..n {
                    log.record(freed(id));
                }
                prop_assert_eq!(log.len() as u64, n.min(cap as u64));
                prop_assert_eq!(log.total_recorded(), n);
                let seqs: Vec<_> = log.entries().map(|e| e.seq).collect();
                let expected: Vec<_> = (n.saturating_sub(cap as u64)..n).collect();
                prop_assert_eq!(seqs, expected);
            }
        }
    }
}
