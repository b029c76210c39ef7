//! Scripted arena sessions.
//!
//! Demo sequences ("allocate a few blocks, checkpoint, restore after the
//! frame") are plain data here. A [`Script`] is an ordered list of
//! [`TimedStep`]s; a [`ScriptRunner`] applies them to an arena while a
//! [`Scheduler`] decides what the time offsets mean. The arena itself
//! never sees time, so the same script produces the same events whether
//! it runs instantly or in real time.
//!
//! # Format
//!
//! Scripts can be loaded from TOML:
//!
//! ```toml
//! name = "game"
//!
//! [[steps]]
//! at_ms = 200
//! op = "checkpoint"
//!
//! [[steps]]
//! at_ms = 400
//! op = "allocate"
//! size = 32
//!
//! [[steps]]
//! at_ms = 2500
//! op = "restore"
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod presets;
pub mod runner;
pub mod scheduler;
pub mod script;
pub mod step;

pub use error::ScriptError;
pub use runner::{RunReport, ScriptRunner, StepOutcome};
pub use scheduler::{ImmediateScheduler, Scheduler, SleepScheduler};
pub use script::{Script, ScriptBuilder};
pub use step::{Step, TimedStep};
