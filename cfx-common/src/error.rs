//! Common error types for CivicFix

use thiserror::Error;

/// Common result type for CivicFix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across CivicFix services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The image-labeling collaborator produced no label output at all
    /// (service failure, not an empty prediction list). Callers treat this
    /// as the signal to run the fallback resolver.
    #[error("No label source available: {0}")]
    NoLabelSource(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
