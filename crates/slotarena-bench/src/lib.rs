//! Benchmark profiles and utilities for the slotarena simulator.
//!
//! - [`churn_script`]: a long allocate/checkpoint/restore cycle for
//!   runner throughput
//! - [`filled_arena`]: an arena with every slot occupied

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slotarena_arena::{Arena, ArenaConfig, FINALIZED_BLOCK_SIZE, SMALL_BLOCK_SIZE};
use slotarena_core::NullSink;
use slotarena_script::{Script, ScriptError, Step};

/// Build a script of `frames` game-style frames.
///
/// Each frame checkpoints, allocates `per_frame` blocks (every fourth
/// one finalized), grows one of them, then restores.
pub fn churn_script(frames: u64, per_frame: u64) -> Result<Script, ScriptError> {
    let mut b = Script::builder("churn");
    for frame in 0..frames {
        b = b.at(frame, Step::Checkpoint);
        for i in 0..per_frame {
            let finalizer = i % 4 == 3;
            let size = if finalizer {
                FINALIZED_BLOCK_SIZE
            } else {
                SMALL_BLOCK_SIZE
            };
            b = b.at(frame, Step::Allocate { size, finalizer });
        }
        b = b.at(frame, Step::Reallocate).at(frame, Step::Restore);
    }
    b.build()
}

/// An arena with `capacity` slots, all holding small blocks.
pub fn filled_arena(capacity: usize) -> Arena<NullSink> {
    let mut arena = match Arena::new(ArenaConfig::new(capacity), NullSink) {
        Ok(arena) => arena,
        Err(e) => panic!("bench arena with capacity {capacity}: {e}"),
    };
    while !arena.is_full() {
        if arena.allocate_small().is_err() {
            break;
        }
    }
    arena
}
