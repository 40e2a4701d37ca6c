//! Per-tick errors.

use crate::core::Approach;
use thiserror::Error;

/// Errors that abort a single `advance_tick` call.
///
/// The controller state is left untouched, so the caller may retry the tick
/// with corrected input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TickError {
    #[error("Missing reading for configured approach {approach}")]
    MissingReading { approach: Approach },

    #[error("Tick duration must be greater than zero")]
    ZeroTickDuration,
}
