//! Ingestion for the quake map.
//!
//! Turns raw feed text into typed records for the rendering engine:
//!
//! - Event feed: header line plus ten positional fields per event
//! - Coastline: `latitude longitude` pairs, one per line
//! - Source resolution: first readable entry from a prioritized list of
//!   files and URLs

pub mod coastline;
pub mod error;
pub mod feed;
pub mod source;

// Re-exports
pub use coastline::parse_coastline;
pub use error::{IngestionError, Result};
pub use feed::{parse_event_feed, parse_timestamp, EventFeed};
pub use source::{FetchedSource, SourceLocation, SourceResolver};
