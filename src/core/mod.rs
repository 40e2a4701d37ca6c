//! Core signal types.
//!
//! This module contains the pure building blocks the controller is made of:
//! - Intersection topology (`Approach`, `DirectionPair`, `PairGroups`)
//! - The `State` trait for anything recorded in history
//! - Bounded transition history
//!
//! Nothing here performs I/O or holds hidden mutable state.

mod approach;
mod history;
mod state;

pub use approach::{Approach, DirectionPair, PairGroups};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;
