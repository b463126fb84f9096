//! Error types for the ingestion crate.

use thiserror::Error;

/// Errors that can occur while obtaining or parsing feeds.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Event feed is empty: missing header line")]
    MissingHeader,

    #[error("Line {line} does not match the event layout ({reason}): \"{content}\"")]
    MalformedEvent {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Coastline line {line} is malformed: \"{content}\"")]
    MalformedCoastline { line: usize, content: String },

    #[error("No source could be opened ({attempted} candidates tried)")]
    NoSourceAvailable { attempted: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
