//! Strongly-typed identifiers for allocations and checkpoints.

use std::fmt;

/// Identifies a single allocation within an arena.
///
/// Ids are handed out from a per-arena monotonic counter starting at 1.
/// An id is never reused while the arena lives; only a full `clear`
/// resets the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl BlockId {
    /// The first id an arena hands out.
    pub const FIRST: BlockId = BlockId(1);
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A recorded high-water mark of the id counter.
///
/// The marker holds the highest id already handed out when the
/// checkpoint was taken (0 if nothing had been allocated). Restoring
/// the checkpoint frees every allocation whose id is greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckpointMarker(pub u64);

impl CheckpointMarker {
    /// Whether an allocation with `id` was made after this marker.
    pub fn covers(&self, id: BlockId) -> bool {
        id.0 > self.0
    }
}

impl fmt::Display for CheckpointMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CheckpointMarker {
    fn from(v: u64) -> Self {
        Self(v)
    }
}


#[cfg(all(test, not(miri)))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn later_markers_cover_fewer_ids(a in 0u64..1000, b in 0u64..1000, id in 1u64..1000) {
            let (lo, hi) = (a.min(b), a.max(b));
            // Anything newer than the later marker is newer than the earlier one.
            if CheckpointMarker(hi).covers(BlockId(id)) {
                prop_assert!(CheckpointMarker(lo).covers(BlockId(id)));
            }
        }
    }
}
