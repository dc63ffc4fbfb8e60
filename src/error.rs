//! Error types for Viewfold

use crate::fold::outcome::FoldError;
use thiserror::Error;

/// Result type alias for Viewfold operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Viewfold
#[derive(Error, Debug)]
pub enum Error {
    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A record source failed to produce its next record
    #[error("Source error: {0}")]
    Source(String),

    /// A reduction step rejected a record
    #[error("Reduction error: {0}")]
    Reduction(String),

    /// The worker task running a fold did not finish
    #[error("Worker error: {0}")]
    Worker(String),

    /// A fold aborted
    #[error(transparent)]
    Fold(#[from] FoldError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Worker(e.to_string())
    }
}
