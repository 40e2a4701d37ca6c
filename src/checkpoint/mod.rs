//! Checkpoint and resume for phase controllers.
//!
//! A signal controller may be restarted (maintenance, crash, redeploy)
//! without losing its place in the cycle. A checkpoint captures the
//! configuration, phase state and history, and round-trips through JSON for
//! readability or bincode for compactness.

use crate::builder::ControllerConfig;
use crate::controller::{Phase, PhaseState};
use crate::core::StateHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Bookkeeping carried alongside the controller state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerMetadata {
    /// When the controller was created
    pub created_at: DateTime<Utc>,

    /// When the last tick was processed
    pub updated_at: DateTime<Utc>,

    /// Ticks processed since creation
    pub ticks: u64,

    /// Phase changes since creation, including ones evicted from history
    pub transitions: u64,
}

impl Default for ControllerMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            ticks: 0,
            transitions: 0,
        }
    }
}

/// Serializable snapshot of a [`PhaseController`](crate::PhaseController).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub config: ControllerConfig,

    pub state: PhaseState,

    pub history: StateHistory<Phase>,

    pub metadata: ControllerMetadata,
}

impl ControllerCheckpoint {
    pub(crate) fn new(
        config: ControllerConfig,
        state: PhaseState,
        history: StateHistory<Phase>,
        metadata: ControllerMetadata,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            config,
            state,
            history,
            metadata,
        }
    }

    /// Check that this checkpoint can seed a running controller.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        self.config
            .validate()
            .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))?;

        if self.history.limit() != self.config.history_limit {
            return Err(CheckpointError::ValidationFailed(format!(
                "history keeps {} transitions but the configuration asks for {}",
                self.history.limit(),
                self.config.history_limit
            )));
        }

        if let Phase::Yellow { from, to } = self.state.phase {
            if to != from.opposite() {
                return Err(CheckpointError::ValidationFailed(format!(
                    "yellow clearance from {from} to {to} does not change pairs"
                )));
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
