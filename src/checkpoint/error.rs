//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while saving or restoring a controller checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding the checkpoint as JSON or bincode failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The bytes or text did not decode into a checkpoint
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written by an incompatible format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint decoded but cannot seed a running controller
    #[error("Checkpoint rejected: {0}")]
    ValidationFailed(String),
}
