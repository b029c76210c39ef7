//! Core types and traits for the slotarena allocator model.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: block and
//! checkpoint identifiers, the arena error taxonomy, the structured
//! events emitted on every state transition, and the [`EventSink`]
//! trait that presentation layers implement to observe them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod id;
pub mod sink;

pub use error::ArenaError;
pub use event::{ArenaEvent, Severity};
pub use id::{BlockId, CheckpointMarker};
pub use sink::{EventSink, NullSink};
