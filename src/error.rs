//! Error types for the gesture choreography library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Landmark buffer could not be turned into a hand sample
    #[error("Landmark error: {0}")]
    LandmarkError(String),

    /// Gesture script could not be loaded or parsed
    #[error("Gesture script error: {0}")]
    ScriptError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Scene state could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
