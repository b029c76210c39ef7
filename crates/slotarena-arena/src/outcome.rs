//! Return values of the successful arena operations.

use smallvec::SmallVec;
use slotarena_core::{BlockId, CheckpointMarker};

/// A block placed by `allocate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Id assigned to the block.
    pub id: BlockId,
    /// Slot the block occupies.
    pub slot_index: usize,
    /// Logical size in bytes.
    pub size: u32,
    /// Whether the block carries a finalizer.
    pub has_finalizer: bool,
}

/// A block released by `free`, `free_block`, or a restore sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Freed {
    /// Slot that was released.
    pub slot_index: usize,
    /// Id of the released block.
    pub id: BlockId,
    /// Whether a finalizer ran before the slot was cleared.
    pub finalized: bool,
}

/// Result of `checkpoint`.
///
/// A duplicate is a soft outcome, not a failure: the stack already holds
/// a checkpoint at this marker, so nothing was pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointOutcome {
    /// A new marker was pushed.
    Created(CheckpointMarker),
    /// The marker was already on the stack.
    Duplicate(CheckpointMarker),
}

impl CheckpointOutcome {
    /// The marker, whether or not it was newly pushed.
    pub fn marker(&self) -> CheckpointMarker {
        match self {
            Self::Created(m) | Self::Duplicate(m) => *m,
        }
    }

    /// Whether a new marker was pushed.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Result of `restore`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restored {
    /// The marker that was popped.
    pub marker: CheckpointMarker,
    /// Blocks released by the sweep, in sweep order (descending slot index).
    pub freed: SmallVec<[Freed; 8]>,
}

/// Result of `reallocate_any_without_finalizer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grown {
    /// Slot holding the block (unchanged).
    pub slot_index: usize,
    /// Id of the block (unchanged).
    pub id: BlockId,
    /// Size before the grow.
    pub old_size: u32,
    /// Size after the grow.
    pub new_size: u32,
}

/// Result of `clear`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClearReport {
    /// Number of finalizer-bearing blocks that were live.
    pub finalizers_invoked: usize,
    /// Number of blocks that were live.
    pub released: usize,
    /// Number of checkpoint markers discarded.
    pub checkpoints_discarded: usize,
}
