//! Test fixtures and invariant checks for slotarena development.
//!
//! Provides a [`RecordingArena`] alias with a plain `Vec` sink, builders
//! for common arena shapes, and [`assert_invariants`], which checks the
//! structural guarantees every arena must uphold after any operation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use slotarena_arena::{Arena, ArenaConfig};
use slotarena_core::{ArenaEvent, EventSink};

/// An arena whose sink keeps every event for later assertions.
pub type RecordingArena = Arena<Vec<ArenaEvent>>;

/// An empty recording arena with `capacity` slots.
pub fn recording_arena(capacity: usize) -> RecordingArena {
    Arena::new(ArenaConfig::new(capacity), Vec::new())
        .unwrap_or_else(|e| panic!("fixture arena with capacity {capacity}: {e}"))
}

/// A recording arena with `n` small blocks already placed and the
/// allocation events drained from the sink.
pub fn arena_with_small_blocks(capacity: usize, n: usize) -> RecordingArena {
    let mut arena = recording_arena(capacity);
    for _ in 0..n {
        arena
            .allocate_small()
            .unwrap_or_else(|e| panic!("fixture allocation failed: {e}"));
    }
    arena.sink_mut().clear();
    arena
}

/// Drain and return every event recorded so far.
pub fn take_events(arena: &mut RecordingArena) -> Vec<ArenaEvent> {
    std::mem::take(arena.sink_mut())
}

/// Check the arena's structural invariants, panicking with context.
///
/// - `allocated_count` equals the number of allocated slots.
/// - Live ids are unique and all below `next_id`.
/// - Checkpoint markers are unique and strictly increasing (stack order).
pub fn assert_invariants<S: EventSink>(arena: &Arena<S>) {
    let live = arena
        .slots()
        .iter()
        .filter(|s| s.state().is_allocated())
        .count();
    assert_eq!(
        arena.allocated_count(),
        live,
        "allocated_count does not match slot table"
    );

    let ids: Vec<_> = arena.slots().iter().filter_map(|s| s.state().id()).collect();
    let distinct: HashSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len(), "duplicate live ids: {ids:?}");
    for id in &ids {
        assert!(
            *id < arena.next_id(),
            "live id {id} not below next_id {}",
            arena.next_id()
        );
    }

    let markers: Vec<_> = arena.checkpoints().collect();
    assert!(
        markers.windows(2).all(|w| w[0] < w[1]),
        "checkpoint stack not strictly increasing: {markers:?}"
    );
}

/// Check that every `FinalizerInvoked` in `events` is immediately
/// followed by the `Freed` event for the same block.
pub fn assert_finalizers_precede_frees(events: &[ArenaEvent]) {
    for (i, event) in events.iter().enumerate() {
        if let ArenaEvent::FinalizerInvoked { slot_index, id } = event {
            let next = events.get(i + 1);
            assert_eq!(
                next,
                Some(&ArenaEvent::Freed {
                    slot_index: *slot_index,
                    id: *id
                }),
                "finalizer for block {id} not followed by its free"
            );
        }
    }
}
