//! Error taxonomy for arena operations.
//!
//! Every variant is recoverable: a failed operation leaves the arena
//! exactly as it found it and reports the failure as a value. A duplicate
//! checkpoint is not an error at all; it is reported as a soft outcome by
//! the arena's `checkpoint()` call.

use std::error::Error;
use std::fmt;

use crate::id::BlockId;

/// Errors returned by the mutating arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// `allocate` found no free slot.
    CapacityExhausted {
        /// Fixed slot count of the arena.
        capacity: usize,
    },
    /// `free` targeted a slot that is free or out of range.
    NotAllocated {
        /// The slot index that was requested.
        slot_index: usize,
    },
    /// `free_block` was given an id that is not live in the arena.
    UnknownBlock {
        /// The id that was requested.
        id: BlockId,
    },
    /// `restore` was called with an empty checkpoint stack.
    NoCheckpoints,
    /// `reallocate_any_without_finalizer` found no eligible slot.
    NoCandidate,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExhausted { capacity } => {
                write!(f, "arena full: all {capacity} slots are allocated")
            }
            Self::NotAllocated { slot_index } => {
                write!(f, "slot {slot_index} is not allocated")
            }
            Self::UnknownBlock { id } => write!(f, "block {id} is not live in this arena"),
            Self::NoCheckpoints => write!(f, "no checkpoints to restore"),
            Self::NoCandidate => write!(f, "no block without a finalizer to reallocate"),
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_slot() {
        let e = ArenaError::NotAllocated { slot_index: 3 };
        assert_eq!(e.to_string(), "slot 3 is not allocated");
    }

    #[test]
    fn display_capacity() {
        let e = ArenaError::CapacityExhausted { capacity: 16 };
        assert!(e.to_string().contains("16"));
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn Error> = Box::new(ArenaError::NoCheckpoints);
        assert_eq!(e.to_string(), "no checkpoints to restore");
    }
}
