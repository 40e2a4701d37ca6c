//! Phaseplan: a density-driven traffic signal phase controller
//!
//! Phaseplan decides, once per control tick, whether the green phase of a
//! two-pair intersection should continue or hand over to the opposing pair.
//! The decision is a pure function of the measured traffic densities and the
//! time already spent in the phase; the caller owns the clock and the signal
//! hardware (or simulator) and applies each decision.
//!
//! # Core Concepts
//!
//! - **Approach / DirectionPair**: four approaches split into two pairs that
//!   share a green
//! - **Density**: vehicles per unit length, averaged per pair
//! - **Phase**: `Green(pair)` or the mandatory `Yellow` clearance between greens
//! - **Policy**: minimum green floor, maximum green ceiling, and a hysteresis
//!   ratio the waiting pair must exceed before it preempts the active one
//!
//! # Example
//!
//! ```rust
//! use phaseplan::{Approach, ApproachMeasurement, ControlDecision, ControllerBuilder, Readings};
//! use std::time::Duration;
//!
//! let mut controller = ControllerBuilder::new().build().unwrap();
//!
//! let readings: Readings = [
//!     (Approach::North, ApproachMeasurement::new(2, 100.0)),
//!     (Approach::South, ApproachMeasurement::new(2, 100.0)),
//!     (Approach::East, ApproachMeasurement::new(9, 100.0)),
//!     (Approach::West, ApproachMeasurement::new(9, 100.0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut decisions = Vec::new();
//! for _ in 0..21 {
//!     decisions.push(controller.advance_tick(&readings, Duration::from_secs(1)).unwrap());
//! }
//!
//! assert!(decisions[..20].iter().all(|d| *d == ControlDecision::Continue));
//! assert!(matches!(decisions[20], ControlDecision::BeginTransition { .. }));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod controller;
pub mod core;
pub mod density;

// Re-export commonly used types
pub use builder::{BuildError, ConfigViolation, ControllerBuilder, ControllerConfig};
pub use checkpoint::{CheckpointError, ControllerCheckpoint, ControllerMetadata};
pub use controller::{
    ControlDecision, Phase, PhaseController, PhaseState, SwitchReason, TickError,
};
pub use crate::core::{Approach, DirectionPair, PairGroups, State, StateHistory, StateTransition};
pub use density::{
    compute_approach_density, compute_pair_density, ApproachMeasurement, PairDensities, Readings,
};
