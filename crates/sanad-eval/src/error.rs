//! Error types for sanad-eval

use thiserror::Error;

/// Evaluation error type
#[derive(Debug, Error)]
pub enum Error {
    /// Writing a report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A simulated session task panicked or was cancelled
    #[error("simulated session failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
