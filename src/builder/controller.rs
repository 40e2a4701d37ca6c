//! Builder for constructing phase controllers.

use crate::builder::config::ControllerConfig;
use crate::builder::error::BuildError;
use crate::controller::PhaseController;
use crate::core::{DirectionPair, PairGroups};
use std::time::Duration;

/// Builder for constructing a [`PhaseController`] with a fluent API.
///
/// Starts from [`ControllerConfig::default`]; `build` validates the result.
///
/// ```rust
/// use phaseplan::{ControllerBuilder, DirectionPair};
/// use std::time::Duration;
///
/// let controller = ControllerBuilder::new()
///     .min_green(Duration::from_secs(10))
///     .max_green(Duration::from_secs(40))
///     .default_pair(DirectionPair::B)
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.current_state().active_pair(), DirectionPair::B);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ControllerBuilder {
    config: ControllerConfig,
}

impl ControllerBuilder {
    /// Create a new builder with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn min_green(mut self, duration: Duration) -> Self {
        self.config.min_green_time = duration;
        self
    }

    pub fn max_green(mut self, duration: Duration) -> Self {
        self.config.max_green_time = duration;
        self
    }

    pub fn yellow_clearance(mut self, duration: Duration) -> Self {
        self.config.yellow_clearance = duration;
        self
    }

    pub fn density_switch_ratio(mut self, ratio: f64) -> Self {
        self.config.density_switch_ratio = ratio;
        self
    }

    pub fn approach_pairs(mut self, groups: PairGroups) -> Self {
        self.config.approach_pairs = groups;
        self
    }

    /// Set the pair that is green when the controller starts.
    pub fn default_pair(mut self, pair: DirectionPair) -> Self {
        self.config.default_pair = pair;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the controller.
    /// Returns an error listing every configuration violation.
    pub fn build(self) -> Result<PhaseController, BuildError> {
        PhaseController::new(self.config)
    }
}
