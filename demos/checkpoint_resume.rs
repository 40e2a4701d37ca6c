//! Checkpoint and Resume
//!
//! This example restarts a controller mid-cycle without losing its place.
//!
//! Key concepts:
//! - Checkpoints capture configuration, phase, elapsed time and history
//! - JSON for readability, bincode for compactness
//! - Atomic writes to prevent corruption
//! - A resumed controller finishes the yellow it was interrupted in
//!
//! Run with: cargo run --example checkpoint_resume

use phaseplan::{
    Approach, ApproachMeasurement, ControlDecision, ControllerCheckpoint, PhaseController, Readings,
};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CHECKPOINT_DIR: &str = "/tmp/phaseplan-checkpoints";

fn readings() -> Readings {
    [
        (Approach::North, ApproachMeasurement::new(4, 200.0)),
        (Approach::South, ApproachMeasurement::new(2, 200.0)),
        (Approach::East, ApproachMeasurement::new(15, 200.0)),
        (Approach::West, ApproachMeasurement::new(11, 200.0)),
    ]
    .into_iter()
    .collect()
}

fn save(checkpoint: &ControllerCheckpoint) -> Result<String, String> {
    fs::create_dir_all(CHECKPOINT_DIR).map_err(|e| e.to_string())?;
    let path = format!("{}/controller-{}.json", CHECKPOINT_DIR, checkpoint.metadata.ticks);
    let json = checkpoint.to_json().map_err(|e| e.to_string())?;

    // Atomic write: write to temp file, then rename
    let temp_path = format!("{path}.tmp");
    fs::write(&temp_path, json).map_err(|e| e.to_string())?;
    fs::rename(&temp_path, &path).map_err(|e| e.to_string())?;

    println!("  [Checkpoint] Saved to {path}");
    Ok(path)
}

fn load(path: &str) -> Result<ControllerCheckpoint, String> {
    let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let checkpoint = ControllerCheckpoint::from_json(&json).map_err(|e| e.to_string())?;
    println!("  [Checkpoint] Loaded from {path}");
    Ok(checkpoint)
}

fn run(controller: &mut PhaseController, ticks: usize) {
    let readings = readings();
    for _ in 0..ticks {
        match controller.advance_tick(&readings, Duration::from_secs(1)) {
            Ok(ControlDecision::Continue) => {}
            Ok(decision) => println!(
                "  tick {:>3}: {:?} -> now {}",
                controller.ticks(),
                decision,
                controller.current_state().phase
            ),
            Err(e) => println!("  tick rejected: {e}"),
        }
    }
}

fn main() {
    println!("=== Checkpoint and Resume Example ===\n");

    println!("Run 1: controller starts, interrupted during yellow");
    println!("----------------------------------------");
    let mut controller = PhaseController::with_defaults();
    run(&mut controller, 22);

    let checkpoint = controller.checkpoint();
    match checkpoint.to_binary() {
        Ok(bytes) => println!("  Binary checkpoint size: {} bytes", bytes.len()),
        Err(e) => println!("  Binary encoding failed: {e}"),
    }
    let saved = match save(&checkpoint) {
        Ok(path) => path,
        Err(e) => {
            println!("  Could not save checkpoint: {e}");
            return;
        }
    };
    drop(controller);
    println!("\n  [INTERRUPT] Controller stopped.\n");

    println!("Run 2: resuming from checkpoint");
    println!("----------------------------------------");
    let resumed =
        load(&saved).and_then(|cp| PhaseController::resume(cp).map_err(|e| e.to_string()));
    match resumed {
        Ok(mut controller) => {
            let state = controller.current_state();
            println!(
                "  Resumed in {} after {:?}",
                state.phase, state.elapsed
            );
            run(&mut controller, 10);
        }
        Err(e) => println!("  Resume failed: {e}"),
    }

    if Path::new(CHECKPOINT_DIR).exists() {
        fs::remove_dir_all(CHECKPOINT_DIR).ok();
    }

    println!("\n=== Example Complete ===");
}
