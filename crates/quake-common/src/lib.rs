//! Common types shared across the quakemap crates.

pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod geo;

pub use color::{Color, Palette};
pub use config::RenderConfig;
pub use error::{QuakeError, QuakeResult};
pub use event::{EventRecord, EventSummary};
pub use geo::{CoastlinePoint, GeoPosition};
