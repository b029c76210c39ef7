//! Event sinks for observing slotarena arenas.
//!
//! - [`EventLog`] keeps the most recent N events (FIFO eviction) with a
//!   sequence number and severity tag, ready for a log view.
//! - [`ChannelSink`] forwards events to another thread over a
//!   crossbeam channel.
//! - [`Tee`] records every event into two sinks, in order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod log;
pub mod tee;

pub use channel::ChannelSink;
pub use log::{EventLog, LogEntry};
pub use tee::Tee;
