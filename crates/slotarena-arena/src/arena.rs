//! The fixed-capacity slot arena.
//!
//! [`Arena`] owns the slot table, the checkpoint stack and the id counter
//! as one unit of state. Every mutation goes through one of its six
//! operations, and every operation emits its events to the arena's sink
//! in the order the transitions happen.

use indexmap::IndexSet;
use smallvec::SmallVec;
use slotarena_core::{ArenaError, ArenaEvent, BlockId, CheckpointMarker, EventSink};

use crate::config::{ArenaConfig, ConfigError};
use crate::outcome::{Allocation, CheckpointOutcome, ClearReport, Freed, Grown, Restored};
use crate::slot::{Slot, SlotState};
use crate::snapshot::{ArenaSnapshot, SlotView};

/// Logical size used by [`Arena::allocate_small`].
pub const SMALL_BLOCK_SIZE: u32 = 32;

/// Logical size used by [`Arena::allocate_with_finalizer`].
pub const FINALIZED_BLOCK_SIZE: u32 = 64;

/// Logical size used by [`Arena::allocate_large`].
pub const LARGE_BLOCK_SIZE: u32 = 128;

/// A fixed table of slots with checkpoint/restore and finalizers.
///
/// The table is sized once from [`ArenaConfig::capacity`] and never
/// grows. Ids come from a monotonic counter that only [`clear`](Self::clear)
/// resets. Checkpoints form a LIFO stack of id high-water marks; restoring
/// one frees every block allocated after it.
///
/// Failed operations leave the arena untouched and report an
/// [`ArenaError`]; the matching diagnostic event is still emitted.
pub struct Arena<S: EventSink> {
    config: ArenaConfig,
    slots: Vec<Slot>,
    allocated_count: usize,
    next_id: u64,
    /// Insertion order is stack order; set membership rejects duplicates.
    checkpoints: IndexSet<CheckpointMarker>,
    sink: S,
}

impl<S: EventSink> Arena<S> {
    /// Create an empty arena. All slots start free and the counter at 1.
    pub fn new(config: ArenaConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = (0..config.capacity).map(Slot::new).collect();
        Ok(Self {
            config,
            slots,
            allocated_count: 0,
            next_id: BlockId::FIRST.0,
            checkpoints: IndexSet::new(),
            sink,
        })
    }

    // ── Mutating operations ─────────────────────────────────────

    /// Place a block in the first free slot, scanning in index order.
    pub fn allocate(&mut self, size: u32, has_finalizer: bool) -> Result<Allocation, ArenaError> {
        let Some(slot_index) = self.slots.iter().position(|s| !s.state.is_allocated()) else {
            let capacity = self.capacity();
            tracing::warn!(capacity, "allocation failed: arena full");
            self.sink.record(ArenaEvent::AllocationFailed { capacity });
            return Err(ArenaError::CapacityExhausted { capacity });
        };

        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.slots[slot_index].state = SlotState::Allocated {
            id,
            size,
            has_finalizer,
        };
        self.allocated_count += 1;

        tracing::debug!(slot_index, id = id.0, size, has_finalizer, "allocated");
        self.sink.record(ArenaEvent::Allocated {
            slot_index,
            id,
            size,
            has_finalizer,
        });
        self.debug_check();
        Ok(Allocation {
            id,
            slot_index,
            size,
            has_finalizer,
        })
    }

    /// Allocate a 32-byte block without a finalizer.
    pub fn allocate_small(&mut self) -> Result<Allocation, ArenaError> {
        self.allocate(SMALL_BLOCK_SIZE, false)
    }

    /// Allocate a 128-byte block without a finalizer.
    pub fn allocate_large(&mut self) -> Result<Allocation, ArenaError> {
        self.allocate(LARGE_BLOCK_SIZE, false)
    }

    /// Allocate a 64-byte block with a finalizer attached.
    pub fn allocate_with_finalizer(&mut self) -> Result<Allocation, ArenaError> {
        self.allocate(FINALIZED_BLOCK_SIZE, true)
    }

    /// Free the block in `slot_index`, running its finalizer first.
    pub fn free(&mut self, slot_index: usize) -> Result<Freed, ArenaError> {
        let Some(SlotState::Allocated {
            id, has_finalizer, ..
        }) = self.slots.get(slot_index).map(Slot::state)
        else {
            tracing::warn!(slot_index, "free rejected: slot not allocated");
            self.sink.record(ArenaEvent::FreeRejected { slot_index });
            return Err(ArenaError::NotAllocated { slot_index });
        };
        let freed = self.release(slot_index, id, has_finalizer);
        self.debug_check();
        Ok(freed)
    }

    /// Free the live block with the given id, wherever it sits.
    pub fn free_block(&mut self, id: BlockId) -> Result<Freed, ArenaError> {
        match self.find(id) {
            Some(slot_index) => self.free(slot_index),
            None => {
                tracing::warn!(id = id.0, "free rejected: unknown block");
                self.sink.record(ArenaEvent::UnknownBlock { id });
                Err(ArenaError::UnknownBlock { id })
            }
        }
    }

    /// Push a checkpoint at the current id high-water mark.
    ///
    /// If a checkpoint at the same marker is already anywhere on the
    /// stack, nothing is pushed and [`CheckpointOutcome::Duplicate`] is
    /// returned.
    pub fn checkpoint(&mut self) -> CheckpointOutcome {
        let marker = CheckpointMarker(self.next_id - 1);
        if !self.checkpoints.insert(marker) {
            tracing::debug!(marker = marker.0, "checkpoint already exists");
            self.sink.record(ArenaEvent::CheckpointDuplicate { marker });
            return CheckpointOutcome::Duplicate(marker);
        }
        let depth = self.checkpoints.len();
        tracing::debug!(marker = marker.0, depth, "checkpoint created");
        self.sink
            .record(ArenaEvent::CheckpointCreated { marker, depth });
        CheckpointOutcome::Created(marker)
    }

    /// Pop the most recent checkpoint and free everything allocated after it.
    ///
    /// The sweep visits slots in descending index order, not descending
    /// id order; finalizer events are observed in that order.
    pub fn restore(&mut self) -> Result<Restored, ArenaError> {
        let Some(marker) = self.checkpoints.pop() else {
            tracing::warn!("restore rejected: no checkpoints");
            self.sink.record(ArenaEvent::RestoreRejected);
            return Err(ArenaError::NoCheckpoints);
        };

        let mut freed = SmallVec::<[Freed; 8]>::new();
        for slot_index in (0..self.slots.len()).rev() {
            if let SlotState::Allocated {
                id, has_finalizer, ..
            } = self.slots[slot_index].state
            {
                if marker.covers(id) {
                    freed.push(self.release(slot_index, id, has_finalizer));
                }
            }
        }

        tracing::debug!(marker = marker.0, freed = freed.len(), "restored checkpoint");
        self.sink.record(ArenaEvent::Restored {
            marker,
            freed: freed.len(),
        });
        self.debug_check();
        Ok(Restored { marker, freed })
    }

    /// Grow the first finalizer-free block in place, doubling its size up
    /// to [`ArenaConfig::max_block_size`].
    ///
    /// Blocks with finalizers are never eligible.
    pub fn reallocate_any_without_finalizer(&mut self) -> Result<Grown, ArenaError> {
        let cap = self.config.max_block_size;
        let candidate = self.slots.iter_mut().find_map(|slot| {
            let index = slot.index();
            match &mut slot.state {
                SlotState::Allocated {
                    id,
                    size,
                    has_finalizer: false,
                } => Some((index, *id, size)),
                _ => None,
            }
        });
        let Some((slot_index, id, size)) = candidate else {
            tracing::warn!("reallocation rejected: no candidate");
            self.sink.record(ArenaEvent::ReallocationRejected);
            return Err(ArenaError::NoCandidate);
        };

        let old_size = *size;
        let new_size = old_size.saturating_mul(2).min(cap);
        *size = new_size;

        tracing::debug!(slot_index, id = id.0, old_size, new_size, "reallocated");
        self.sink.record(ArenaEvent::Reallocated {
            slot_index,
            id,
            old_size,
            new_size,
        });
        Ok(Grown {
            slot_index,
            id,
            old_size,
            new_size,
        })
    }

    /// Tear the arena down to its initial state.
    ///
    /// Finalizers are reported as one aggregate event rather than per
    /// block. The id counter restarts at 1.
    pub fn clear(&mut self) -> ClearReport {
        let finalizers_invoked = self
            .slots
            .iter()
            .filter(|s| s.state.has_finalizer())
            .count();
        if finalizers_invoked > 0 {
            self.sink.record(ArenaEvent::FinalizersBatchInvoked {
                count: finalizers_invoked,
            });
        }

        let report = ClearReport {
            finalizers_invoked,
            released: self.allocated_count,
            checkpoints_discarded: self.checkpoints.len(),
        };
        for slot in &mut self.slots {
            slot.release();
        }
        self.checkpoints.clear();
        self.allocated_count = 0;
        self.next_id = BlockId::FIRST.0;

        tracing::debug!(
            released = report.released,
            finalizers = finalizers_invoked,
            "arena cleared"
        );
        self.sink.record(ArenaEvent::ArenaDestroyed {
            released: report.released,
        });
        report
    }

    // ── Read-only surface ───────────────────────────────────────

    /// The configuration the arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Fixed slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a block.
    pub fn allocated_count(&self) -> usize {
        self.allocated_count
    }

    /// Number of free slots.
    pub fn free_count(&self) -> usize {
        self.capacity() - self.allocated_count
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.allocated_count == self.capacity()
    }

    /// The id the next allocation will receive.
    pub fn next_id(&self) -> BlockId {
        BlockId(self.next_id)
    }

    /// Checkpoint markers, oldest first.
    pub fn checkpoints(&self) -> impl Iterator<Item = CheckpointMarker> + '_ {
        self.checkpoints.iter().copied()
    }

    /// Number of checkpoints on the stack.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// The slot at `index`, if in range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot index of the live block with `id`.
    pub fn find(&self, id: BlockId) -> Option<usize> {
        self.slots.iter().position(|s| s.state.id() == Some(id))
    }

    /// Number of live blocks carrying a finalizer.
    pub fn finalizer_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state.has_finalizer())
            .count()
    }

    /// An owned, read-only view for rendering.
    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            slots: self
                .slots
                .iter()
                .map(|s| SlotView {
                    index: s.index(),
                    address: s.address(),
                    state: s.state(),
                })
                .collect(),
            allocated_count: self.allocated_count,
            capacity: self.capacity(),
            checkpoints: self.checkpoints().collect(),
            next_id: self.next_id(),
        }
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink (e.g. to drain it).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the arena and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // ── Internals ───────────────────────────────────────────────

    /// Finalizer-then-clear for one allocated slot.
    fn release(&mut self, slot_index: usize, id: BlockId, has_finalizer: bool) -> Freed {
        if has_finalizer {
            self.sink
                .record(ArenaEvent::FinalizerInvoked { slot_index, id });
        }
        self.slots[slot_index].release();
        self.allocated_count -= 1;
        tracing::debug!(slot_index, id = id.0, finalized = has_finalizer, "freed");
        self.sink.record(ArenaEvent::Freed { slot_index, id });
        Freed {
            slot_index,
            id,
            finalized: has_finalizer,
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.allocated_count,
            self.slots.iter().filter(|s| s.state.is_allocated()).count(),
            "allocated_count out of sync with slot table"
        );
    }
}

impl<S: EventSink + Default> Arena<S> {
    /// Create an arena with `capacity` slots, default growth cap and a
    /// default-constructed sink.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::new(ArenaConfig::new(capacity), S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotarena_core::NullSink;

    fn arena(capacity: usize) -> Arena<Vec<ArenaEvent>> {
        Arena::new(ArenaConfig::new(capacity), Vec::new()).unwrap()
    }

    #[test]
    fn new_arena_is_empty() {
        let a = arena(16);
        assert_eq!(a.capacity(), 16);
        assert_eq!(a.allocated_count(), 0);
        assert_eq!(a.next_id(), BlockId(1));
        assert_eq!(a.checkpoint_depth(), 0);
        assert!(a.sink().is_empty());
    }

    #[test]
    fn zero_capacity_is_config_error() {
        let r = Arena::new(ArenaConfig::new(0), NullSink);
        assert!(matches!(r, Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn allocate_takes_first_free_slot() {
        let mut a = arena(4);
        let b1 = a.allocate_small().unwrap();
        let b2 = a.allocate_large().unwrap();
        assert_eq!((b1.id, b1.slot_index, b1.size), (BlockId(1), 0, 32));
        assert_eq!((b2.id, b2.slot_index, b2.size), (BlockId(2), 1, 128));

        a.free(0).unwrap();
        let b3 = a.allocate_with_finalizer().unwrap();
        assert_eq!(b3.slot_index, 0, "freed slot is reused first");
        assert_eq!(b3.id, BlockId(3), "ids are never reused");
        assert!(b3.has_finalizer);
    }

    #[test]
    fn allocate_emits_event() {
        let mut a = arena(2);
        a.allocate(64, true).unwrap();
        assert_eq!(
            a.sink().as_slice(),
            &[ArenaEvent::Allocated {
                slot_index: 0,
                id: BlockId(1),
                size: 64,
                has_finalizer: true,
            }]
        );
    }

    #[test]
    fn full_arena_rejects_without_state_change() {
        let mut a = arena(2);
        a.allocate_small().unwrap();
        a.allocate_small().unwrap();
        let before = a.snapshot();

        let err = a.allocate_small().unwrap_err();
        assert_eq!(err, ArenaError::CapacityExhausted { capacity: 2 });
        assert_eq!(a.snapshot(), before);
        assert_eq!(
            a.sink().last(),
            Some(&ArenaEvent::AllocationFailed { capacity: 2 })
        );
    }

    #[test]
    fn free_runs_finalizer_before_freed_event() {
        let mut a = arena(2);
        a.allocate_with_finalizer().unwrap();
        a.sink_mut().clear();

        let freed = a.free(0).unwrap();
        assert!(freed.finalized);
        assert_eq!(
            a.sink().as_slice(),
            &[
                ArenaEvent::FinalizerInvoked {
                    slot_index: 0,
                    id: BlockId(1)
                },
                ArenaEvent::Freed {
                    slot_index: 0,
                    id: BlockId(1)
                },
            ]
        );
    }

    #[test]
    fn free_without_finalizer_emits_only_freed() {
        let mut a = arena(2);
        a.allocate_small().unwrap();
        a.sink_mut().clear();
        let freed = a.free(0).unwrap();
        assert!(!freed.finalized);
        assert_eq!(a.sink().len(), 1);
    }

    #[test]
    fn free_of_free_or_out_of_range_slot_is_rejected() {
        let mut a = arena(2);
        assert_eq!(a.free(0), Err(ArenaError::NotAllocated { slot_index: 0 }));
        assert_eq!(a.free(9), Err(ArenaError::NotAllocated { slot_index: 9 }));
        assert_eq!(
            a.sink().as_slice(),
            &[
                ArenaEvent::FreeRejected { slot_index: 0 },
                ArenaEvent::FreeRejected { slot_index: 9 },
            ]
        );
        assert_eq!(a.allocated_count(), 0);
    }

    #[test]
    fn free_block_by_id() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        let b = a.allocate_small().unwrap();
        let freed = a.free_block(b.id).unwrap();
        assert_eq!(freed.slot_index, 1);
        assert_eq!(
            a.free_block(b.id),
            Err(ArenaError::UnknownBlock { id: b.id })
        );
        assert_eq!(
            a.sink().last(),
            Some(&ArenaEvent::UnknownBlock { id: b.id })
        );
    }

    #[test]
    fn checkpoint_records_high_water_mark() {
        let mut a = arena(4);
        assert_eq!(a.checkpoint(), CheckpointOutcome::Created(CheckpointMarker(0)));
        a.allocate_small().unwrap();
        a.allocate_small().unwrap();
        assert_eq!(a.checkpoint(), CheckpointOutcome::Created(CheckpointMarker(2)));
        assert_eq!(
            a.checkpoints().collect::<Vec<_>>(),
            vec![CheckpointMarker(0), CheckpointMarker(2)]
        );
    }

    #[test]
    fn duplicate_checkpoint_is_soft_noop() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        assert!(a.checkpoint().is_created());
        let dup = a.checkpoint();
        assert_eq!(dup, CheckpointOutcome::Duplicate(CheckpointMarker(1)));
        assert_eq!(a.checkpoint_depth(), 1);
        let last = a.sink().last().unwrap();
        assert!(!last.is_failure());
    }

    #[test]
    fn duplicate_detected_after_free() {
        let mut a = arena(4);
        a.checkpoint();
        a.allocate_small().unwrap();
        a.checkpoint();
        a.free(0).unwrap();
        // next_id is still 2, so the top marker is a duplicate.
        assert!(!a.checkpoint().is_created());
        assert_eq!(a.checkpoint_depth(), 2);
    }

    #[test]
    fn restore_without_checkpoint_is_rejected() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        assert_eq!(a.restore(), Err(ArenaError::NoCheckpoints));
        assert_eq!(a.allocated_count(), 1);
        assert_eq!(a.sink().last(), Some(&ArenaEvent::RestoreRejected));
    }

    #[test]
    fn capacity_four_scenario() {
        let mut a = arena(4);
        let b1 = a.allocate(32, false).unwrap();
        let b2 = a.allocate(128, false).unwrap();
        assert_eq!((b1.id, b1.slot_index), (BlockId(1), 0));
        assert_eq!((b2.id, b2.slot_index), (BlockId(2), 1));
        assert_eq!(a.checkpoint(), CheckpointOutcome::Created(CheckpointMarker(2)));
        let b3 = a.allocate(64, true).unwrap();
        assert_eq!((b3.id, b3.slot_index), (BlockId(3), 2));
        a.sink_mut().clear();

        let restored = a.restore().unwrap();
        assert_eq!(restored.marker, CheckpointMarker(2));
        assert_eq!(restored.freed.len(), 1);
        assert_eq!(restored.freed[0].slot_index, 2);
        assert_eq!(a.checkpoint_depth(), 0);
        assert_eq!(a.allocated_count(), 2);
        assert_eq!(
            a.sink().as_slice(),
            &[
                ArenaEvent::FinalizerInvoked {
                    slot_index: 2,
                    id: BlockId(3)
                },
                ArenaEvent::Freed {
                    slot_index: 2,
                    id: BlockId(3)
                },
                ArenaEvent::Restored {
                    marker: CheckpointMarker(2),
                    freed: 1
                },
            ]
        );
    }

    #[test]
    fn restore_sweeps_by_descending_slot_index() {
        let mut a = arena(4);
        a.allocate_small().unwrap(); // id 1, slot 0
        a.allocate_small().unwrap(); // id 2, slot 1
        a.checkpoint(); // marker 2
        a.free(0).unwrap();
        a.allocate_with_finalizer().unwrap(); // id 3, slot 0
        a.allocate_with_finalizer().unwrap(); // id 4, slot 2

        let restored = a.restore().unwrap();
        let order: Vec<_> = restored.freed.iter().map(|f| (f.slot_index, f.id)).collect();
        assert_eq!(order, vec![(2, BlockId(4)), (0, BlockId(3))]);

        let finalized: Vec<_> = a
            .sink()
            .iter()
            .filter_map(|e| match e {
                ArenaEvent::FinalizerInvoked { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(finalized, vec![BlockId(4), BlockId(3)]);
        assert_eq!(a.allocated_count(), 1);
    }

    #[test]
    fn restore_with_nothing_new_frees_nothing() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        a.checkpoint();
        let restored = a.restore().unwrap();
        assert!(restored.freed.is_empty());
        assert_eq!(a.allocated_count(), 1);
    }

    #[test]
    fn nested_checkpoints_restore_lifo() {
        let mut a = arena(8);
        a.allocate_small().unwrap(); // 1
        a.checkpoint(); // m1 = 1
        a.allocate_small().unwrap(); // 2
        a.checkpoint(); // m2 = 2
        a.allocate_small().unwrap(); // 3

        let first = a.restore().unwrap();
        assert_eq!(first.marker, CheckpointMarker(2));
        assert_eq!(a.allocated_count(), 2);

        let second = a.restore().unwrap();
        assert_eq!(second.marker, CheckpointMarker(1));
        assert_eq!(a.allocated_count(), 1);
        assert_eq!(a.restore(), Err(ArenaError::NoCheckpoints));
    }

    #[test]
    fn reallocate_doubles_and_caps() {
        let mut a = arena(4);
        a.allocate_with_finalizer().unwrap();
        a.allocate_large().unwrap();

        let grown = a.reallocate_any_without_finalizer().unwrap();
        assert_eq!(
            grown,
            Grown {
                slot_index: 1,
                id: BlockId(2),
                old_size: 128,
                new_size: 256
            }
        );
        let again = a.reallocate_any_without_finalizer().unwrap();
        assert_eq!((again.old_size, again.new_size), (256, 256));
        assert_eq!(a.slot(1).unwrap().state().id(), Some(BlockId(2)));
    }

    #[test]
    fn reallocate_from_small_block() {
        let mut a = arena(2);
        a.allocate_small().unwrap();
        let grown = a.reallocate_any_without_finalizer().unwrap();
        assert_eq!((grown.old_size, grown.new_size), (32, 64));
    }

    #[test]
    fn reallocate_skips_finalizer_blocks() {
        let mut a = arena(4);
        assert_eq!(
            a.reallocate_any_without_finalizer(),
            Err(ArenaError::NoCandidate)
        );
        a.allocate_with_finalizer().unwrap();
        let before = a.snapshot();
        assert_eq!(
            a.reallocate_any_without_finalizer(),
            Err(ArenaError::NoCandidate)
        );
        assert_eq!(a.snapshot(), before);
        assert_eq!(a.sink().last(), Some(&ArenaEvent::ReallocationRejected));
    }

    #[test]
    fn reallocate_respects_configured_cap() {
        let config = ArenaConfig {
            capacity: 2,
            max_block_size: 100,
        };
        let mut a = Arena::new(config, NullSink).unwrap();
        a.allocate(64, false).unwrap();
        let grown = a.reallocate_any_without_finalizer().unwrap();
        assert_eq!(grown.new_size, 100);
    }

    #[test]
    fn clear_reports_finalizers_in_one_event() {
        let mut a = arena(4);
        a.allocate_with_finalizer().unwrap();
        a.allocate_small().unwrap();
        a.allocate_with_finalizer().unwrap();
        a.checkpoint();
        a.sink_mut().clear();

        let report = a.clear();
        assert_eq!(
            report,
            ClearReport {
                finalizers_invoked: 2,
                released: 3,
                checkpoints_discarded: 1,
            }
        );
        assert_eq!(
            a.sink().as_slice(),
            &[
                ArenaEvent::FinalizersBatchInvoked { count: 2 },
                ArenaEvent::ArenaDestroyed { released: 3 },
            ]
        );
        assert_eq!(a.allocated_count(), 0);
        assert_eq!(a.next_id(), BlockId(1));
        assert_eq!(a.checkpoint_depth(), 0);
        assert_eq!(a.allocate_small().unwrap().id, BlockId(1));
    }

    #[test]
    fn clear_without_finalizers_skips_batch_event() {
        let mut a = arena(2);
        a.allocate_small().unwrap();
        a.sink_mut().clear();
        a.clear();
        assert_eq!(
            a.sink().as_slice(),
            &[ArenaEvent::ArenaDestroyed { released: 1 }]
        );
    }

    #[test]
    fn allocate_then_free_round_trips() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        let before = a.snapshot();
        let b = a.allocate_large().unwrap();
        a.free(b.slot_index).unwrap();
        let after = a.snapshot();
        assert_eq!(after.slots, before.slots);
        assert_eq!(after.allocated_count, before.allocated_count);
        assert_ne!(after.next_id, before.next_id);
    }

    #[test]
    fn find_and_finalizer_count() {
        let mut a = arena(4);
        a.allocate_small().unwrap();
        let f = a.allocate_with_finalizer().unwrap();
        assert_eq!(a.find(f.id), Some(1));
        assert_eq!(a.find(BlockId(99)), None);
        assert_eq!(a.finalizer_count(), 1);
        assert_eq!(a.free_count(), 2);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        #[derive(Clone, Debug)]
        enum Op {
            Alloc(u32, bool),
            Free(usize),
            Checkpoint,
            Restore,
            Realloc,
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (prop_oneof![Just(32u32), Just(64), Just(128)], any::<bool>())
                    .prop_map(|(s, f)| Op::Alloc(s, f)),
                2 => (0usize..10).prop_map(Op::Free),
                1 => Just(Op::Checkpoint),
                1 => Just(Op::Restore),
                1 => Just(Op::Realloc),
                1 => Just(Op::Clear),
            ]
        }

        fn apply(a: &mut Arena<NullSink>, op: &Op) {
            match op {
                Op::Alloc(s, f) => {
                    let _ = a.allocate(*s, *f);
                }
                Op::Free(i) => {
                    let _ = a.free(*i);
                }
                Op::Checkpoint => {
                    a.checkpoint();
                }
                Op::Restore => {
                    let _ = a.restore();
                }
                Op::Realloc => {
                    let _ = a.reallocate_any_without_finalizer();
                }
                Op::Clear => {
                    a.clear();
                }
            }
        }

        proptest! {
            #[test]
            fn allocated_count_matches_slot_table(ops in proptest::collection::vec(op(), 0..64)) {
                let mut a = Arena::new(ArenaConfig::new(8), NullSink).unwrap();
                for op in &ops {
                    apply(&mut a, op);
                    let live = a.slots().iter().filter(|s| s.state().is_allocated()).count();
                    prop_assert_eq!(a.allocated_count(), live);
                }
            }

            #[test]
            fn live_ids_unique_and_below_counter(ops in proptest::collection::vec(op(), 0..64)) {
                let mut a = Arena::new(ArenaConfig::new(8), NullSink).unwrap();
                let mut highest_issued = 0u64;
                for op in &ops {
                    apply(&mut a, op);
                    if matches!(op, Op::Clear) {
                        highest_issued = 0;
                    }
                    let ids: Vec<_> = a.slots().iter().filter_map(|s| s.state().id()).collect();
                    let distinct: HashSet<_> = ids.iter().collect();
                    prop_assert_eq!(distinct.len(), ids.len());
                    for id in &ids {
                        highest_issued = highest_issued.max(id.0);
                    }
                    prop_assert!(a.next_id().0 > highest_issued);
                }
            }

            #[test]
            fn checkpoint_markers_stay_distinct(ops in proptest::collection::vec(op(), 0..64)) {
                let mut a = Arena::new(ArenaConfig::new(8), NullSink).unwrap();
                for op in &ops {
                    apply(&mut a, op);
                    let markers: Vec<_> = a.checkpoints().collect();
                    let distinct: HashSet<_> = markers.iter().collect();
                    prop_assert_eq!(distinct.len(), markers.len());
                }
            }

            #[test]
            fn failed_ops_leave_state_unchanged(ops in proptest::collection::vec(op(), 0..48)) {
                let mut a = Arena::new(ArenaConfig::new(4), NullSink).unwrap();
                for op in &ops {
                    let before = a.snapshot();
                    let failed = match op {
                        Op::Alloc(s, f) => a.allocate(*s, *f).is_err(),
                        Op::Free(i) => a.free(*i).is_err(),
                        Op::Restore => a.restore().is_err(),
                        Op::Realloc => a.reallocate_any_without_finalizer().is_err(),
                        Op::Checkpoint => !a.checkpoint().is_created(),
                        Op::Clear => {
                            a.clear();
                            false
                        }
                    };
                    if failed {
                        prop_assert_eq!(a.snapshot(), before);
                    }
                }
            }

            #[test]
            fn restore_frees_exactly_later_blocks(
                before in 0usize..4,
                after in 0usize..4,
            ) {
                let mut a = Arena::new(ArenaConfig::new(8), NullSink).unwrap();
                for _ in 0..before {
                    a.allocate_small().unwrap();
                }
                a.checkpoint();
                for _ in 0..after {
                    a.allocate_with_finalizer().unwrap();
                }
                let restored = a.restore().unwrap();
                prop_assert_eq!(restored.freed.len(), after);
                prop_assert_eq!(a.allocated_count(), before);
            }
        }
    }
}
