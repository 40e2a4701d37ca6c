//! The phase controller.
//!
//! A `PhaseController` owns one intersection's signal state. Each call to
//! `advance_tick` is atomic: it validates the readings, decides, applies the
//! decision to the owned state, and returns it for the caller to act on.
//!
//! # Key Concepts
//!
//! - **Phase**: `Green(pair)` or the `Yellow` clearance between greens
//! - **Decision**: what the caller must apply to the real signal this tick
//! - **Policy**: min/max green bounds plus density hysteresis

mod error;
mod machine;
mod phase;
pub mod policy;

pub use error::TickError;
pub use machine::PhaseController;
pub use phase::{ControlDecision, Phase, PhaseState, SwitchReason};
