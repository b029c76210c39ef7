//! Owned, read-only views of arena state for presentation layers.

use std::fmt;

use slotarena_core::{BlockId, CheckpointMarker};

use crate::slot::SlotState;

/// One slot as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView {
    /// Position in the arena.
    pub index: usize,
    /// Synthetic display address.
    pub address: u64,
    /// Occupancy at the time of the snapshot.
    pub state: SlotState,
}

/// A copy of the arena's observable state.
///
/// Taking a snapshot never mutates the arena, and mutating the arena
/// afterwards never changes an existing snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaSnapshot {
    /// Every slot, in index order.
    pub slots: Vec<SlotView>,
    /// Number of allocated slots.
    pub allocated_count: usize,
    /// Fixed slot count.
    pub capacity: usize,
    /// Checkpoint markers, oldest first.
    pub checkpoints: Vec<CheckpointMarker>,
    /// The id the next allocation will receive.
    pub next_id: BlockId,
}

impl ArenaSnapshot {
    /// Number of live blocks carrying a finalizer.
    pub fn finalizer_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state.has_finalizer())
            .count()
    }

    /// The view of the slot at `index`, if in range.
    pub fn slot(&self, index: usize) -> Option<&SlotView> {
        self.slots.get(index)
    }

    /// Compact one-line map of the slot table, e.g. `[B1 B2 FREE FREE]`.
    pub fn slot_map(&self) -> String {
        let cells: Vec<String> = self
            .slots
            .iter()
            .map(|s| match s.state {
                SlotState::Free => "FREE".to_string(),
                SlotState::Allocated {
                    id,
                    has_finalizer: true,
                    ..
                } => format!("B{id}*"),
                SlotState::Allocated { id, .. } => format!("B{id}"),
            })
            .collect();
        format!("[{}]", cells.join(" "))
    }
}

impl fmt::Display for ArenaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena: {}/{} blocks allocated | {} checkpoints | {} finalizers",
            self.allocated_count,
            self.capacity,
            self.checkpoints.len(),
            self.finalizer_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arena, ArenaConfig};
    use slotarena_core::NullSink;

    #[test]
    fn snapshot_reflects_arena() {
        let mut a = Arena::new(ArenaConfig::new(4), NullSink).unwrap();
        a.allocate_small().unwrap();
        a.allocate_with_finalizer().unwrap();
        a.checkpoint();

        let snap = a.snapshot();
        assert_eq!(snap.capacity, 4);
        assert_eq!(snap.allocated_count, 2);
        assert_eq!(snap.checkpoints, vec![CheckpointMarker(2)]);
        assert_eq!(snap.next_id, BlockId(3));
        assert_eq!(snap.finalizer_count(), 1);
        assert_eq!(snap.slot(1).unwrap().address, 0x7fff_0040);
        assert_eq!(snap.slot_map(), "[B1 B2* FREE FREE]");
        assert_eq!(
            snap.to_string(),
            "arena: 2/4 blocks allocated | 1 checkpoints | 1 finalizers"
        );
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut a = Arena::new(ArenaConfig::new(2), NullSink).unwrap();
        let snap = a.snapshot();
        a.allocate_small().unwrap();
        assert_eq!(snap.allocated_count, 0);
        assert!(!snap.slots[0].state.is_allocated());
    }
}
