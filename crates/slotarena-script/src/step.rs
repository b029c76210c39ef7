//! Individual script operations.

use std::fmt;

use serde::Deserialize;

/// One arena operation (or a narration line) in a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `allocate(size, finalizer)`.
    Allocate {
        /// Logical block size in bytes.
        size: u32,
        /// Attach a finalizer to the block.
        finalizer: bool,
    },
    /// `free(slot)`.
    Free {
        /// Slot index to free.
        slot: usize,
    },
    /// `free_block(id)`.
    FreeBlock {
        /// Block id to free.
        id: u64,
    },
    /// `checkpoint()`.
    Checkpoint,
    /// `restore()`.
    Restore,
    /// `reallocate_any_without_finalizer()`.
    Reallocate,
    /// `clear()`.
    Clear,
    /// Narration. Logged, never applied to the arena.
    Note {
        /// The narration line.
        text: String,
    },
}

impl Step {
    /// A narration step.
    pub fn note(text: impl Into<String>) -> Self {
        Self::Note { text: text.into() }
    }

    /// Whether the step touches the arena.
    pub fn is_arena_op(&self) -> bool {
        !matches!(self, Self::Note { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocate {
                size,
                finalizer: true,
            } => write!(f, "allocate({size}) + finalizer"),
            Self::Allocate { size, .. } => write!(f, "allocate({size})"),
            Self::Free { slot } => write!(f, "free(slot {slot})"),
            Self::FreeBlock { id } => write!(f, "free(block {id})"),
            Self::Checkpoint => write!(f, "checkpoint"),
            Self::Restore => write!(f, "restore"),
            Self::Reallocate => write!(f, "reallocate"),
            Self::Clear => write!(f, "clear"),
            Self::Note { text } => write!(f, "# {text}"),
        }
    }
}

/// A step scheduled at an offset from the start of the script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedStep {
    /// Milliseconds after the script starts.
    pub at_ms: u64,
    /// The operation.
    pub step: Step,
}

impl TimedStep {
    /// Schedule `step` at `at_ms`.
    pub fn new(at_ms: u64, step: Step) -> Self {
        Self { at_ms, step }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Op {
    Allocate,
    Free,
    FreeBlock,
    Checkpoint,
    Restore,
    Reallocate,
    Clear,
    Note,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Self::Allocate => "allocate",
            Self::Free => "free",
            Self::FreeBlock => "free_block",
            Self::Checkpoint => "checkpoint",
            Self::Restore => "restore",
            Self::Reallocate => "reallocate",
            Self::Clear => "clear",
            Self::Note => "note",
        }
    }

    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Allocate => &["size", "finalizer"],
            Self::Free => &["slot"],
            Self::FreeBlock => &["id"],
            Self::Note => &["text"],
            Self::Checkpoint | Self::Restore | Self::Reallocate | Self::Clear => &[],
        }
    }
}

/// One `[[steps]]` table as written in a script file.
///
/// Every operand is optional here; [`RawStep::validate`] rejects missing
/// operands and operands the operation does not take.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawStep {
    #[serde(default)]
    at_ms: u64,
    op: Op,
    size: Option<u32>,
    finalizer: Option<bool>,
    slot: Option<usize>,
    id: Option<u64>,
    text: Option<String>,
}

impl RawStep {
    pub(crate) fn validate(self) -> Result<TimedStep, String> {
        let op = self.op;
        let given = [
            ("size", self.size.is_some()),
            ("finalizer", self.finalizer.is_some()),
            ("slot", self.slot.is_some()),
            ("id", self.id.is_some()),
            ("text", self.text.is_some()),
        ];
        if let Some((field, _)) = given
            .iter()
            .find(|(field, set)| *set && !op.fields().contains(field))
        {
            return Err(format!("`{}` does not take `{field}`", op.name()));
        }

        fn required<T>(op: Op, field: &str, value: Option<T>) -> Result<T, String> {
            value.ok_or_else(|| format!("`{}` requires `{field}`", op.name()))
        }

        let step = match op {
            Op::Allocate => Step::Allocate {
                size: required(op, "size", self.size)?,
                finalizer: self.finalizer.unwrap_or(false),
            },
            Op::Free => Step::Free {
                slot: required(op, "slot", self.slot)?,
            },
            Op::FreeBlock => Step::FreeBlock {
                id: required(op, "id", self.id)?,
            },
            Op::Checkpoint => Step::Checkpoint,
            Op::Restore => Step::Restore,
            Op::Reallocate => Step::Reallocate,
            Op::Clear => Step::Clear,
            Op::Note => Step::Note {
                text: required(op, "text", self.text)?,
            },
        };
        Ok(TimedStep::new(self.at_ms, step))
    }
}
