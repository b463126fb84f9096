//! Seismic event records and feed-wide diagnostics.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPosition;

/// Instant assigned to events whose timestamp could not be parsed.
///
/// It produces the largest possible age, so such events fall into the
/// oldest color bucket instead of aborting ingestion.
pub const EARLIEST_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One line of the event feed, fully typed.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub source_id: String,
    pub event_id: String,
    pub version: String,
    /// Timestamp text exactly as it appeared in the feed.
    pub raw_timestamp: String,
    pub position: GeoPosition,
    pub magnitude: f64,
    pub depth_km: f64,
    pub station_count: u32,
    pub region: String,
    /// Parsed instant, or [`EARLIEST_TIMESTAMP`].
    pub timestamp: DateTime<Utc>,
    /// Reference "now" minus `timestamp`.
    pub age: Duration,
}

impl EventRecord {
    /// Age relative to a reference instant captured once per run.
    pub fn age_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(timestamp)
    }

    /// Age in fractional days.
    pub fn age_days(&self) -> f64 {
        self.age.num_seconds() as f64 / SECONDS_PER_DAY
    }

    pub fn has_known_timestamp(&self) -> bool {
        self.timestamp != EARLIEST_TIMESTAMP
    }
}

/// Ranges observed over a set of events, for logging and run reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub count: usize,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub min_age_days: f64,
    pub max_age_days: f64,
    /// Events that fell back to [`EARLIEST_TIMESTAMP`].
    pub undated: usize,
}

impl EventSummary {
    /// Summarize a set of events; `None` when there are none.
    pub fn from_events(events: &[EventRecord]) -> Option<Self> {
        let first = events.first()?;
        let mut summary = Self {
            count: 0,
            min_latitude: first.position.latitude,
            max_latitude: first.position.latitude,
            min_longitude: first.position.longitude,
            max_longitude: first.position.longitude,
            min_magnitude: first.magnitude,
            max_magnitude: first.magnitude,
            min_age_days: first.age_days(),
            max_age_days: first.age_days(),
            undated: 0,
        };

        for event in events {
            summary.count += 1;
            summary.min_latitude = summary.min_latitude.min(event.position.latitude);
            summary.max_latitude = summary.max_latitude.max(event.position.latitude);
            summary.min_longitude = summary.min_longitude.min(event.position.longitude);
            summary.max_longitude = summary.max_longitude.max(event.position.longitude);
            summary.min_magnitude = summary.min_magnitude.min(event.magnitude);
            summary.max_magnitude = summary.max_magnitude.max(event.magnitude);
            let age = event.age_days();
            summary.min_age_days = summary.min_age_days.min(age);
            summary.max_age_days = summary.max_age_days.max(age);
            if !event.has_known_timestamp() {
                summary.undated += 1;
            }
        }

        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_age_from_reference() {
        let now = Utc.with_ymd_and_hms(2011, 4, 8, 0, 0, 0).unwrap();
        let ts = Utc.with_ymd_and_hms(2011, 4, 7, 12, 0, 0).unwrap();
        assert_eq!(EventRecord::age_from(ts, now), Duration::hours(12));
    }

    #[test]
    fn test_earliest_timestamp_age_is_huge() {
        let now = Utc.with_ymd_and_hms(2011, 4, 8, 0, 0, 0).unwrap();
        let age = EventRecord::age_from(EARLIEST_TIMESTAMP, now);
        assert!(age > Duration::days(365 * 1000));
    }
}
