//! Applying scripts to arenas.

use std::time::Duration;

use slotarena_arena::{
    Allocation, Arena, ArenaSnapshot, CheckpointOutcome, ClearReport, Freed, Grown, Restored,
};
use slotarena_core::{ArenaError, BlockId, EventSink};

use crate::scheduler::Scheduler;
use crate::script::Script;
use crate::step::Step;

/// What one step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// `allocate` placed a block.
    Allocated(Allocation),
    /// `free` or `free_block` released a block.
    Freed(Freed),
    /// `checkpoint` pushed a marker or found a duplicate.
    Checkpoint(CheckpointOutcome),
    /// `restore` rewound to a marker.
    Restored(Restored),
    /// `reallocate` grew a block.
    Grown(Grown),
    /// `clear` tore the arena down.
    Cleared(ClearReport),
    /// A narration step; the arena was not touched.
    Noted,
    /// The operation was rejected; the arena is unchanged.
    Failed(ArenaError),
}

impl StepOutcome {
    /// Whether the step was rejected.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of running a script to completion.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Name of the script that ran.
    pub script: String,
    /// One `(at_ms, outcome)` per step, in execution order.
    pub outcomes: Vec<(u64, StepOutcome)>,
    /// Arena state after the last step.
    pub final_state: ArenaSnapshot,
}

impl RunReport {
    /// Number of rejected steps.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }
}

/// Drives an arena through a [`Script`].
///
/// Rejected operations are recorded in the report and the run carries
/// on; the arena imposes no retry policy and neither does the runner.
pub struct ScriptRunner<T: Scheduler> {
    scheduler: T,
}

impl<T: Scheduler> ScriptRunner<T> {
    /// Create a runner using `scheduler` for timing.
    pub fn new(scheduler: T) -> Self {
        Self { scheduler }
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Apply every step of `script` to `arena`, in order.
    pub fn run<S: EventSink>(&mut self, script: &Script, arena: &mut Arena<S>) -> RunReport {
        tracing::info!(script = script.name(), steps = script.len(), "running script");
        self.scheduler.start();

        let mut outcomes = Vec::with_capacity(script.len());
        for timed in script.steps() {
            self.scheduler
                .wait_until(Duration::from_millis(timed.at_ms));
            let outcome = apply(&timed.step, arena);
            if let StepOutcome::Failed(err) = &outcome {
                tracing::debug!(at_ms = timed.at_ms, step = %timed.step, %err, "step rejected");
            }
            outcomes.push((timed.at_ms, outcome));
        }

        RunReport {
            script: script.name().to_string(),
            outcomes,
            final_state: arena.snapshot(),
        }
    }
}

/// Apply a single step.
pub fn apply<S: EventSink>(step: &Step, arena: &mut Arena<S>) -> StepOutcome {
    fn lift<V>(r: Result<V, ArenaError>, f: impl FnOnce(V) -> StepOutcome) -> StepOutcome {
        r.map_or_else(StepOutcome::Failed, f)
    }

    match step {
        Step::Allocate { size, finalizer } => {
            lift(arena.allocate(*size, *finalizer), StepOutcome::Allocated)
        }
        Step::Free { slot } => lift(arena.free(*slot), StepOutcome::Freed),
        Step::FreeBlock { id } => lift(arena.free_block(BlockId(*id)), StepOutcome::Freed),
        Step::Checkpoint => StepOutcome::Checkpoint(arena.checkpoint()),
        Step::Restore => lift(arena.restore(), StepOutcome::Restored),
        Step::Reallocate => lift(
            arena.reallocate_any_without_finalizer(),
            StepOutcome::Grown,
        ),
        Step::Clear => StepOutcome::Cleared(arena.clear()),
        Step::Note { text } => {
            tracing::info!(note = %text, "script note");
            StepOutcome::Noted
        }
    }
}
