//! Structured events emitted by arena operations.
//!
//! Each state transition (and each rejected operation) produces exactly
//! one [`ArenaEvent`], in the order the transitions happen. Sinks render
//! them; nothing downstream of the sink feeds back into the arena.

use std::fmt;

use crate::id::{BlockId, CheckpointMarker};

/// How an event should be presented in a log view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A successful state transition.
    Info,
    /// A rejected operation. State was left unchanged.
    Error,
    /// Commentary: finalizer activity and soft no-ops.
    Annotation,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
            Self::Annotation => write!(f, "annotation"),
        }
    }
}

/// One observable arena transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaEvent {
    /// A free slot was claimed by a new allocation.
    Allocated {
        /// Slot that now holds the block.
        slot_index: usize,
        /// Id assigned to the block.
        id: BlockId,
        /// Logical size in bytes.
        size: u32,
        /// Whether the block carries a finalizer.
        has_finalizer: bool,
    },
    /// `allocate` found every slot occupied.
    AllocationFailed {
        /// Fixed slot count of the arena.
        capacity: usize,
    },
    /// A block's finalizer ran. Always precedes the matching [`ArenaEvent::Freed`].
    FinalizerInvoked {
        /// Slot being released.
        slot_index: usize,
        /// Id of the finalized block.
        id: BlockId,
    },
    /// A slot was returned to the free state.
    Freed {
        /// Slot that was released.
        slot_index: usize,
        /// Id of the released block.
        id: BlockId,
    },
    /// `free` targeted a free or out-of-range slot.
    FreeRejected {
        /// The slot index that was requested.
        slot_index: usize,
    },
    /// `free_block` was given an id that is not live.
    UnknownBlock {
        /// The id that was requested.
        id: BlockId,
    },
    /// A checkpoint marker was pushed.
    CheckpointCreated {
        /// The recorded marker.
        marker: CheckpointMarker,
        /// Stack depth after the push.
        depth: usize,
    },
    /// A checkpoint at this marker already exists; nothing was pushed.
    CheckpointDuplicate {
        /// The marker that was already recorded.
        marker: CheckpointMarker,
    },
    /// A checkpoint was popped and everything allocated after it freed.
    Restored {
        /// The marker that was restored.
        marker: CheckpointMarker,
        /// Number of slots released by the sweep.
        freed: usize,
    },
    /// `restore` was called with an empty checkpoint stack.
    RestoreRejected,
    /// A block was grown in place.
    Reallocated {
        /// Slot holding the block.
        slot_index: usize,
        /// Id of the block (unchanged).
        id: BlockId,
        /// Size before the grow.
        old_size: u32,
        /// Size after the grow, capped.
        new_size: u32,
    },
    /// No allocated block without a finalizer was available to grow.
    ReallocationRejected,
    /// Bulk teardown ran the finalizers of `count` blocks at once.
    FinalizersBatchInvoked {
        /// Number of finalizer-bearing blocks that were live.
        count: usize,
    },
    /// The arena was cleared back to its initial state.
    ArenaDestroyed {
        /// Number of blocks that were live before the clear.
        released: usize,
    },
}

impl ArenaEvent {
    /// Log severity for this event.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Allocated { .. }
            | Self::Freed { .. }
            | Self::CheckpointCreated { .. }
            | Self::Restored { .. }
            | Self::Reallocated { .. }
            | Self::ArenaDestroyed { .. } => Severity::Info,
            Self::AllocationFailed { .. }
            | Self::FreeRejected { .. }
            | Self::UnknownBlock { .. }
            | Self::RestoreRejected
            | Self::ReallocationRejected => Severity::Error,
            Self::FinalizerInvoked { .. }
            | Self::FinalizersBatchInvoked { .. }
            | Self::CheckpointDuplicate { .. } => Severity::Annotation,
        }
    }

    /// Whether this event reports a rejected operation.
    pub fn is_failure(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for ArenaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocated {
                slot_index,
                id,
                size,
                has_finalizer,
            } => {
                write!(f, "alloc({size}) -> block {id} at slot {slot_index}")?;
                if *has_finalizer {
                    write!(f, " with finalizer")?;
                }
                Ok(())
            }
            Self::AllocationFailed { capacity } => {
                write!(f, "alloc failed: arena full ({capacity} slots)")
            }
            Self::FinalizerInvoked { id, .. } => write!(f, "calling finalizer for block {id}"),
            Self::Freed { slot_index, id } => write!(f, "free(block {id}) at slot {slot_index}"),
            Self::FreeRejected { slot_index } => {
                write!(f, "free rejected: slot {slot_index} is not allocated")
            }
            Self::UnknownBlock { id } => write!(f, "free rejected: block {id} is not live"),
            Self::CheckpointCreated { marker, depth } => {
                write!(f, "snapshot -> checkpoint at {marker} (depth {depth})")
            }
            Self::CheckpointDuplicate { marker } => {
                write!(f, "checkpoint already exists at {marker}")
            }
            Self::Restored { marker, freed } => {
                write!(f, "restore -> checkpoint {marker}, {freed} blocks freed")
            }
            Self::RestoreRejected => write!(f, "no checkpoints to restore"),
            Self::Reallocated {
                id,
                old_size,
                new_size,
                ..
            } => write!(f, "realloc(block {id}, {old_size} -> {new_size})"),
            Self::ReallocationRejected => write!(f, "no suitable block for reallocation"),
            Self::FinalizersBatchInvoked { count } => write!(f, "calling {count} finalizers"),
            Self::ArenaDestroyed { released } => {
                write!(f, "destroy -> all memory freed ({released} blocks)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_follow_outcome() {
        let ok = ArenaEvent::Freed {
            slot_index: 0,
            id: BlockId(1),
        };
        assert_eq!(ok.severity(), Severity::Info);
        assert!(ArenaEvent::RestoreRejected.is_failure());
        let dup = ArenaEvent::CheckpointDuplicate {
            marker: CheckpointMarker(2),
        };
        assert_eq!(dup.severity(), Severity::Annotation);
        assert!(!dup.is_failure());
    }

    #[test]
    fn finalizer_events_are_annotations() {
        let single = ArenaEvent::FinalizerInvoked {
            slot_index: 2,
            id: BlockId(3),
        };
        let batch = ArenaEvent::FinalizersBatchInvoked { count: 2 };
        assert_eq!(single.severity(), Severity::Annotation);
        assert_eq!(batch.severity(), Severity::Annotation);
    }

    #[test]
    fn allocated_display_mentions_finalizer() {
        let e = ArenaEvent::Allocated {
            slot_index: 2,
            id: BlockId(3),
            size: 64,
            has_finalizer: true,
        };
        assert_eq!(
            e.to_string(),
            "alloc(64) -> block 3 at slot 2 with finalizer"
        );
    }

    #[test]
    fn reallocated_display() {
        let e = ArenaEvent::Reallocated {
            slot_index: 0,
            id: BlockId(1),
            old_size: 128,
            new_size: 256,
        };
        assert_eq!(e.to_string(), "realloc(block 1, 128 -> 256)");
    }
}
