//! Named, time-ordered step lists.

use serde::Deserialize;

use crate::error::ScriptError;
use crate::step::{RawStep, Step, TimedStep};

/// An ordered list of timed arena operations.
///
/// Steps are kept sorted by `at_ms`. Steps sharing an offset keep the
/// order in which they were added, so "allocate, then checkpoint at the
/// same instant" stays in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    name: String,
    steps: Vec<TimedStep>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    name: String,
    #[serde(default)]
    steps: Vec<RawStep>,
}

impl Script {
    /// Start building a script.
    pub fn builder(name: impl Into<String>) -> ScriptBuilder {
        ScriptBuilder {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Build a script from already-timed steps.
    pub fn new(name: impl Into<String>, mut steps: Vec<TimedStep>) -> Result<Self, ScriptError> {
        let name = name.into();
        if steps.is_empty() {
            return Err(ScriptError::Empty { name });
        }
        // Stable: equal offsets keep insertion order.
        steps.sort_by_key(|s| s.at_ms);
        Ok(Self { name, steps })
    }

    /// Parse a script from a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, ScriptError> {
        let raw: RawScript = toml::from_str(src).map_err(|e| ScriptError::Parse {
            detail: e.to_string(),
        })?;
        let steps = raw
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                step.validate().map_err(|detail| ScriptError::Parse {
                    detail: format!("step {i}: {detail}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(raw.name, steps)
    }

    /// One of the built-in scripts; see [`presets::PRESET_NAMES`](crate::presets::PRESET_NAMES).
    pub fn preset(name: &str) -> Result<Self, ScriptError> {
        crate::presets::preset(name)
    }

    /// Script name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    /// Number of steps, narration included.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; empty scripts are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step.
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }
}

/// Incremental [`Script`] construction.
#[derive(Clone, Debug)]
pub struct ScriptBuilder {
    name: String,
    steps: Vec<TimedStep>,
}

impl ScriptBuilder {
    /// Schedule `step` at `at_ms`.
    pub fn at(mut self, at_ms: u64, step: Step) -> Self {
        self.steps.push(TimedStep::new(at_ms, step));
        self
    }

    /// Finish the script.
    pub fn build(self) -> Result<Script, ScriptError> {
        Script::new(self.name, self.steps)
    }
}


#[cfg(all(test, not(miri)))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn order_is_by_offset_then_insertion(offsets in prop::collection::vec(0u64..20, 1..40)) {
            // Tag each step with its insertion index so ties are observable.
            let steps: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, &at)| TimedStep::new(at, Step::FreeBlock { id: i as u64 }))
                .collect();
            let script = Script::new("p", steps).unwrap();

            let keys: Vec<(u64, u64)> = script
                .steps()
                .iter()
                .map(|s| match s.step {
                    Step::FreeBlock { id } => (s.at_ms, id),
                    _ => unreachable!(),
                })
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(script.duration_ms(), *offsets.iter().max().unwrap());
        }
    }
}
