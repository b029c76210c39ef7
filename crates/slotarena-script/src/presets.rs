//! Built-in demo scripts.
//!
//! Each preset starts from a cleared arena and models one allocation
//! pattern: a short-lived request, a parse phase, a game frame, and so on.

use slotarena_arena::{FINALIZED_BLOCK_SIZE, LARGE_BLOCK_SIZE, SMALL_BLOCK_SIZE};

use crate::error::ScriptError;
use crate::script::Script;
use crate::step::Step;

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 6] = [
    "basic",
    "compiler",
    "game",
    "server",
    "stress",
    "fragmentation",
];

fn small() -> Step {
    Step::Allocate {
        size: SMALL_BLOCK_SIZE,
        finalizer: false,
    }
}

fn large() -> Step {
    Step::Allocate {
        size: LARGE_BLOCK_SIZE,
        finalizer: false,
    }
}

fn finalized() -> Step {
    Step::Allocate {
        size: FINALIZED_BLOCK_SIZE,
        finalizer: true,
    }
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Result<Script, ScriptError> {
    match name {
        "basic" => basic(),
        "compiler" => compiler(),
        "game" => game(),
        "server" => server(),
        "stress" => stress(),
        "fragmentation" => fragmentation(),
        _ => Err(ScriptError::UnknownPreset { name: name.into() }),
    }
}

/// Three allocations of increasing weight; the last carries a finalizer.
pub fn basic() -> Result<Script, ScriptError> {
    Script::builder("basic")
        .at(0, Step::Clear)
        .at(0, Step::note("Simulating basic usage pattern..."))
        .at(500, small())
        .at(1000, large())
        .at(1500, finalized())
        .build()
}

/// Six AST nodes with a checkpoint after the third, then bulk teardown.
pub fn compiler() -> Result<Script, ScriptError> {
    let mut b = Script::builder("compiler")
        .at(0, Step::Clear)
        .at(0, Step::note("Simulating compiler parse phase..."));
    for i in 0..6u64 {
        b = b.at(i * 300, small());
        if i == 2 {
            b = b.at(i * 300, Step::Checkpoint);
        }
    }
    b.at(3000, Step::note("Parse complete - freeing AST nodes"))
        .at(3000, Step::Clear)
        .build()
}

/// Per-frame allocations rewound by restoring a frame-start checkpoint.
pub fn game() -> Result<Script, ScriptError> {
    Script::builder("game")
        .at(0, Step::Clear)
        .at(0, Step::note("Simulating game frame allocation..."))
        .at(200, Step::Checkpoint)
        .at(400, small()) // entities
        .at(600, large()) // particles
        .at(800, small()) // render commands
        .at(2500, Step::note("Frame complete - restoring checkpoint"))
        .at(2500, Step::Restore)
        .build()
}

/// A request struct, headers, and a finalized file handle, then cleanup.
pub fn server() -> Result<Script, ScriptError> {
    Script::builder("server")
        .at(0, Step::Clear)
        .at(0, Step::note("Simulating HTTP request handling..."))
        .at(300, small())
        .at(600, large())
        .at(900, finalized())
        .at(2500, Step::note("Request complete - cleaning up"))
        .at(2500, Step::Clear)
        .build()
}

/// Eight mixed allocations in quick succession.
pub fn stress() -> Result<Script, ScriptError> {
    let mut b = Script::builder("stress")
        .at(0, Step::note("Running stress test..."))
        .at(0, Step::Clear);
    for i in 0..8u64 {
        let step = if i % 3 == 0 {
            finalized()
        } else if i % 2 == 0 {
            large()
        } else {
            small()
        };
        b = b.at(i * 200, step);
    }
    b.at(2000, Step::note("Stress test complete")).build()
}

/// Four allocations, then the second and fourth freed to leave holes.
pub fn fragmentation() -> Result<Script, ScriptError> {
    Script::builder("fragmentation")
        .at(0, Step::note("Demonstrating fragmentation handling..."))
        .at(0, Step::Clear)
        .at(200, small())
        .at(400, large())
        .at(600, small())
        .at(800, large())
        .at(1200, Step::Free { slot: 1 })
        .at(1200, Step::note("Freed middle block - creating fragmentation"))
        .at(1600, Step::Free { slot: 3 })
        .at(1600, Step::note("Freed slots are reused first-fit"))
        .build()
}
