//! Adaptive Intersection
//!
//! This example drives a controller from a toy queue model, standing in for
//! the simulator or loop detectors a real deployment would read.
//!
//! Key concepts:
//! - The caller owns the clock and steps the controller once per second
//! - Each decision is applied to the (simulated) signal by the caller
//! - Traffic shifts from North-South to East-West halfway through
//!
//! Run with: cargo run --example adaptive_intersection

use phaseplan::{
    Approach, ApproachMeasurement, ControlDecision, DirectionPair, Phase, PhaseController,
    Readings,
};
use std::collections::HashMap;
use std::time::Duration;

const APPROACH_LENGTH_M: f64 = 200.0;
const DISCHARGE_PER_TICK: u32 = 1;
const RUN_SECONDS: u32 = 600;

/// Vehicles arriving per tick on `approach`, as a repeating pattern.
fn arrivals(approach: Approach, second: u32) -> u32 {
    let north_south_peak = second < RUN_SECONDS / 2;
    let heavy = match approach {
        Approach::North | Approach::South => north_south_peak,
        Approach::East | Approach::West => !north_south_peak,
    };
    let period = if heavy { 2 } else { 7 };
    u32::from(second % period == 0)
}

fn main() {
    println!("=== Adaptive Intersection ===\n");

    let mut controller = PhaseController::with_defaults();
    let mut queues: HashMap<Approach, u32> = Approach::ALL.into_iter().map(|a| (a, 0)).collect();

    for second in 1..=RUN_SECONDS {
        for approach in Approach::ALL {
            *queues.entry(approach).or_default() += arrivals(approach, second);
        }

        let readings: Readings = queues
            .iter()
            .map(|(approach, count)| {
                (*approach, ApproachMeasurement::new(*count, APPROACH_LENGTH_M))
            })
            .collect();

        let decision = match controller.advance_tick(&readings, Duration::from_secs(1)) {
            Ok(decision) => decision,
            Err(e) => {
                println!("t={second:>4}s  tick rejected: {e}");
                continue;
            }
        };

        match decision {
            ControlDecision::Continue => {}
            ControlDecision::BeginTransition { target, reason } => println!(
                "t={second:>4}s  yellow for {} ({reason})",
                controller.pair_label(target.opposite())
            ),
            ControlDecision::CompleteTransition { now_green } => println!(
                "t={second:>4}s  {} green",
                controller.pair_label(now_green).to_uppercase()
            ),
        }

        // Vehicles only leave on a green aspect
        if let Phase::Green(pair) = controller.current_state().phase {
            for approach in controller.config().approach_pairs.members(pair) {
                let queue = queues.entry(*approach).or_default();
                *queue = queue.saturating_sub(DISCHARGE_PER_TICK);
            }
        }
    }

    println!("\nFinal state: {}", controller.current_state().phase);
    println!("Ticks processed: {}", controller.ticks());
    println!("Phase changes: {}", controller.metadata().transitions);
    for pair in [DirectionPair::A, DirectionPair::B] {
        let waiting: u32 = controller
            .config()
            .approach_pairs
            .members(pair)
            .iter()
            .map(|a| queues[a])
            .sum();
        println!("Queued on {}: {waiting}", controller.pair_label(pair));
    }

    println!("\n=== Example Complete ===");
}
