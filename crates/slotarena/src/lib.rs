//! slotarena: a fixed-capacity arena simulator with LIFO checkpoints,
//! finalizers and scripted allocation patterns.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all slotarena sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use slotarena::prelude::*;
//!
//! let mut arena = Arena::new(ArenaConfig::new(4), EventLog::default()).unwrap();
//!
//! arena.allocate_small().unwrap();
//! arena.checkpoint();
//! arena.allocate_with_finalizer().unwrap();
//! arena.allocate_large().unwrap();
//!
//! let restored = arena.restore().unwrap();
//! assert_eq!(restored.freed.len(), 2);
//! assert_eq!(arena.allocated_count(), 1);
//!
//! // The finalized block reported its finalizer before being freed.
//! assert!(arena
//!     .sink()
//!     .events()
//!     .any(|e| matches!(e, ArenaEvent::FinalizerInvoked { .. })));
//!
//! // Scripts drive the same arena.
//! let script = slotarena::script::presets::preset("basic").unwrap();
//! let report = ScriptRunner::new(ImmediateScheduler::new()).run(&script, &mut arena);
//! assert_eq!(report.final_state.allocated_count, 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `slotarena-core` | Ids, events, errors, the `EventSink` trait |
//! | [`arena`] | `slotarena-arena` | The arena, configuration, snapshots, `SharedArena` |
//! | [`log`] | `slotarena-log` | Bounded event log, channel and tee sinks |
//! | [`script`] | `slotarena-script` | Timed scripts, presets, schedulers and the runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ids, events, errors and the sink trait (`slotarena-core`).
pub use slotarena_core as types;

/// The arena and its read-only views (`slotarena-arena`).
///
/// [`arena::Arena`] owns the slot table; wrap it in
/// [`arena::SharedArena`] to drive it from several threads.
pub use slotarena_arena as arena;

/// Event sinks (`slotarena-log`).
pub use slotarena_log as log;

/// Timed operation scripts (`slotarena-script`).
///
/// Build a [`script::Script`] by hand, load one from TOML, or pick one of
/// the [`script::presets`], then apply it with a [`script::ScriptRunner`].
pub use slotarena_script as script;

/// Common imports for typical slotarena usage.
///
/// ```rust
/// use slotarena::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use slotarena_core::{
        ArenaError, ArenaEvent, BlockId, CheckpointMarker, EventSink, NullSink, Severity,
    };

    // Arena
    pub use slotarena_arena::{
        Arena, ArenaConfig, ArenaSnapshot, CheckpointOutcome, SharedArena, SlotState,
    };

    // Sinks
    pub use slotarena_log::{ChannelSink, EventLog, Tee};

    // Scripts
    pub use slotarena_script::{
        ImmediateScheduler, Script, ScriptRunner, SleepScheduler, Step, StepOutcome,
    };
}
