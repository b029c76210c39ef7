//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

use serde::Deserialize;

/// Configuration for a slot arena.
///
/// Validated at construction; all values are immutable after creation.
/// Can be deserialized from TOML, with missing keys taking their defaults:
///
/// ```toml
/// capacity = 16
/// max_block_size = 256
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Number of slots in the arena.
    ///
    /// Default: 16. Must be non-zero. The slot table never grows.
    pub capacity: usize,

    /// Upper bound for a block's logical size when grown in place.
    ///
    /// Default: 256. Reallocation doubles a block's size up to this cap.
    pub max_block_size: u32,
}

impl ArenaConfig {
    /// Default slot count.
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Default growth cap in bytes.
    pub const DEFAULT_MAX_BLOCK_SIZE: u32 = 256;

    /// Create a config with the given slot count and the default growth cap.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_block_size: Self::DEFAULT_MAX_BLOCK_SIZE,
        }
    }

    /// Parse a config from a TOML document and validate it.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::ZeroMaxBlockSize);
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Errors detected while loading or validating an [`ArenaConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The arena would have no slots.
    ZeroCapacity,
    /// The growth cap is zero, so no block could ever hold a size.
    ZeroMaxBlockSize,
    /// The TOML source could not be parsed.
    Parse {
        /// Parser message.
        detail: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "arena capacity must be at least 1 slot"),
            Self::ZeroMaxBlockSize => write!(f, "max_block_size must be non-zero"),
            Self::Parse { detail } => write!(f, "invalid arena config: {detail}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_demo_arena() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.max_block_size, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            ArenaConfig::new(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = ArenaConfig::from_toml_str("capacity = 4").unwrap();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.max_block_size, ArenaConfig::DEFAULT_MAX_BLOCK_SIZE);
    }

    #[test]
    fn toml_runs_validation() {
        let err = ArenaConfig::from_toml_str("max_block_size = 0").unwrap_err();
        assert_eq!(err, ConfigError::ZeroMaxBlockSize);
    }

    #[test]
    fn toml_unknown_key_is_parse_error() {
        let err = ArenaConfig::from_toml_str("slots = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
