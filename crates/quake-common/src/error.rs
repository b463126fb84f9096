//! Error types for the rendering side of quakemap.

use thiserror::Error;

/// Result type alias using QuakeError.
pub type QuakeResult<T> = Result<T, QuakeError>;

/// Primary error type for configuration and image encoding.
#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("Invalid configuration value for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("Image encoding failed: {0}")]
    EncodeError(String),
}
