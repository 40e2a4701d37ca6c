//! Configuration and builder API for phase controllers.
//!
//! A controller is only ever constructed from a validated configuration:
//! bad timing bounds or a broken pair topology are reported here, never
//! discovered mid-run.

pub mod config;
pub mod controller;
pub mod error;
mod validation;

pub use config::{
    ControllerConfig, DEFAULT_DENSITY_SWITCH_RATIO, DEFAULT_MAX_GREEN, DEFAULT_MIN_GREEN,
    DEFAULT_YELLOW_CLEARANCE,
};
pub use controller::ControllerBuilder;
pub use error::{BuildError, ConfigViolation};
