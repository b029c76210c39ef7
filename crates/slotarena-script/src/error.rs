//! Error types for script loading.

use std::error::Error;
use std::fmt;

/// Errors that can occur while building or loading a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// The TOML source could not be parsed into a script.
    Parse {
        /// Parser message.
        detail: String,
    },
    /// The script has no steps.
    Empty {
        /// Name of the offending script.
        name: String,
    },
    /// No built-in script has this name.
    UnknownPreset {
        /// The requested name.
        name: String,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "invalid script: {detail}"),
            Self::Empty { name } => write!(f, "script '{name}' has no steps"),
            Self::UnknownPreset { name } => write!(f, "no preset script named '{name}'"),
        }
    }
}

impl Error for ScriptError {}
