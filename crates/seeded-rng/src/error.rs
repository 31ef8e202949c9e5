use thiserror::Error;

/// Errors raised by malformed partition requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChunkError {
    /// The request cannot be satisfied as stated
    #[error("Invalid chunk request: {0}")]
    InvalidArgument(String),
}

impl ChunkError {
    /// Creates an invalid-argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
