//! Fixed-capacity slot arena for the slotarena allocator model.
//!
//! The arena is a table of equally sized slots. Blocks are placed in the
//! first free slot, carry an optional finalizer, and can be released one
//! at a time, in bulk back to a checkpoint, or all at once.
//!
//! # Architecture
//!
//! ```text
//! Arena<S: EventSink>
//! ├── Vec<Slot> (fixed at construction, index order = scan order)
//! ├── IndexSet<CheckpointMarker> (LIFO stack, duplicate-free)
//! ├── next_id (monotonic, reset only by clear)
//! └── S (receives one ArenaEvent per transition)
//!
//! SharedArena<S> = Arc<Mutex<Arena<S>>> for concurrent embeddings
//! ```
//!
//! # Operations
//!
//! - **allocate:** first free slot in index order, or `CapacityExhausted`.
//! - **free:** finalizer (if any) then clear, or `NotAllocated`.
//! - **checkpoint:** push the current id high-water mark; duplicates are
//!   a soft no-op.
//! - **restore:** pop the latest marker and free every later block,
//!   sweeping slots in descending index order.
//! - **reallocate_any_without_finalizer:** double the first finalizer-free
//!   block's size in place, capped.
//! - **clear:** bulk teardown with one aggregate finalizer event.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod outcome;
pub mod shared;
pub mod slot;
pub mod snapshot;

// Public re-exports for the primary API surface.
pub use arena::{Arena, FINALIZED_BLOCK_SIZE, LARGE_BLOCK_SIZE, SMALL_BLOCK_SIZE};
pub use config::{ArenaConfig, ConfigError};
pub use outcome::{Allocation, CheckpointOutcome, ClearReport, Freed, Grown, Restored};
pub use shared::SharedArena;
pub use slot::{Slot, SlotState};
pub use snapshot::{ArenaSnapshot, SlotView};
