//! Coastline parsing.

use quake_common::CoastlinePoint;
use tracing::info;

use crate::error::{IngestionError, Result};

/// Parse `latitude longitude` pairs, one per line.
///
/// Blank lines are skipped and trailing columns ignored. Longitudes are kept
/// as given; [`CoastlinePoint::position`] normalizes them.
pub fn parse_coastline(text: &str) -> Result<Vec<CoastlinePoint>> {
    let mut points = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };
        let malformed = || IngestionError::MalformedCoastline {
            line: i + 1,
            content: line.to_string(),
        };
        let latitude: f64 = first.parse().map_err(|_| malformed())?;
        let longitude: f64 = words
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())?;
        points.push(CoastlinePoint::new(latitude, longitude));
    }

    info!(points = points.len(), "Parsed coastline");
    Ok(points)
}
