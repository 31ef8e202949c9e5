//! Error types for the simulation core.

use seeded_rng::ChunkError;
use thiserror::Error;

/// Errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Caller supplied a value the physics cannot accept (recoverable).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal conservation check failed. The run must be abandoned.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Fragment mass partitioning was asked for an impossible split.
    #[error(transparent)]
    Chunk(#[from] ChunkError),
}

impl PhysicsError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an invariant-violation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// True when the error signals a defect rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
