//! Walk through every built-in preset.
//!
//! Demonstrates: preset → ScriptRunner (real-time or immediate) → event
//! log → snapshot rendering. Pass `--realtime` to honour step offsets.

use slotarena_arena::{Arena, ArenaConfig};
use slotarena_log::EventLog;
use slotarena_script::presets::{self, PRESET_NAMES};
use slotarena_script::{ImmediateScheduler, RunReport, Scheduler, ScriptRunner, SleepScheduler};

fn run_all<T: Scheduler>(runner: &mut ScriptRunner<T>, arena: &mut Arena<EventLog>) {
    for name in PRESET_NAMES {
        let script = presets::preset(name).unwrap();
        println!("--- {name} ({} steps, {} ms) ---", script.len(), script.duration_ms());
        let report: RunReport = runner.run(&script, arena);

        for entry in arena.sink().entries() {
            println!("  {entry}");
        }
        arena.sink_mut().clear();

        let snap = &report.final_state;
        println!("  {}", snap.slot_map());
        println!("  {snap}");
        if report.failures() > 0 {
            println!("  {} step(s) rejected", report.failures());
        }
        println!();
    }
}

fn main() {
    println!("=== slotarena preset demo ===\n");

    let realtime = std::env::args().any(|a| a == "--realtime");
    let mut arena = Arena::new(ArenaConfig::default(), EventLog::default()).unwrap();

    if realtime {
        run_all(&mut ScriptRunner::new(SleepScheduler::new()), &mut arena);
    } else {
        run_all(&mut ScriptRunner::new(ImmediateScheduler::new()), &mut arena);
    }

    println!(
        "{} events recorded, {} evicted from the log",
        arena.sink().total_recorded(),
        arena.sink().evicted()
    );
}
