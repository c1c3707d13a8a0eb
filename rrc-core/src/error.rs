//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Functions of this crate return [`anyhow::Result`]. Errors raised by the crate
/// itself are values of this type and can be recovered with
/// `err.downcast_ref::<RrcError>()`.
#[derive(Error, Debug, PartialEq)]
pub enum RrcError {
    /// Shapes reported by the environment disagree with the policy or its statistics.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The policy artifact is missing or cannot be decoded.
    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad {
        /// Path of the artifact.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// Vectors passed to a computation do not have the expected lengths.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
