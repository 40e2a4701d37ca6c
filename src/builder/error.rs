//! Build errors for controller configuration.

use crate::core::{Approach, DirectionPair};
use std::time::Duration;
use thiserror::Error;

/// A single problem found while validating a controller configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Minimum green ({min:?}) must be shorter than maximum green ({max:?})")]
    GreenBoundsInverted { min: Duration, max: Duration },

    #[error("Yellow clearance must be longer than zero")]
    ZeroYellowClearance,

    #[error("Density switch ratio must be finite and at least 1.0 (got {ratio})")]
    InvalidSwitchRatio { ratio: f64 },

    #[error("Direction pair {pair} has no approaches")]
    EmptyPair { pair: DirectionPair },

    #[error("Approach {approach} is assigned to both direction pairs")]
    OverlappingApproach { approach: Approach },

    #[error("Approach {approach} is not assigned to any direction pair")]
    UnassignedApproach { approach: Approach },
}

/// Errors that can occur when building a controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid controller configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BuildError {
    /// Violations carried by an `InvalidConfig` error, empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::InvalidConfig(violations) => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
