//! Event feed parsing.
//!
//! The feed is a header line followed by one event per line with ten
//! comma-separated fields:
//!
//! ```text
//! Src,Eqid,Version,"Datetime",Lat,Lon,Magnitude,Depth,NST,"Region"
//! ```
//!
//! The datetime and region fields are double-quoted and may contain commas;
//! every other field is bare and contains neither commas nor quotes. A line
//! that does not fit this layout aborts ingestion.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use quake_common::event::EARLIEST_TIMESTAMP;
use quake_common::{EventRecord, GeoPosition};
use tracing::{debug, info};

use crate::error::{IngestionError, Result};

/// Number of fields in an event line.
pub const FIELD_COUNT: usize = 10;

/// Zero-based indices of the quoted fields.
const QUOTED_FIELDS: [usize; 2] = [3, 9];

/// Timestamp layout used by the feed, e.g. `Thursday, April  7, 2011 21:48:15 UTC`.
pub const FEED_TIMESTAMP_FORMAT: &str = "%A, %B %d, %Y %H:%M:%S UTC";

/// A parsed event feed.
#[derive(Debug, Clone)]
pub struct EventFeed {
    /// Column names from the header line.
    pub headers: Vec<String>,
    /// Lines read, header excluded.
    pub line_count: usize,
    pub events: Vec<EventRecord>,
}

/// Parse a whole feed, computing every event's age against `now`.
///
/// `now` should be captured once per run so that all ages agree.
pub fn parse_event_feed(text: &str, now: DateTime<Utc>) -> Result<EventFeed> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(IngestionError::MissingHeader)?;
    let headers: Vec<String> = header.split(',').map(|h| h.trim().to_string()).collect();
    debug!(?headers, "Read event feed header");

    let mut events = Vec::new();
    let mut line_count = 0;
    for (i, line) in lines.enumerate() {
        line_count += 1;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1
        events.push(parse_event_line(line, i + 2, now)?);
    }

    info!(
        lines = line_count,
        events = events.len(),
        "Parsed event feed"
    );
    Ok(EventFeed {
        headers,
        line_count,
        events,
    })
}

/// Parse one data line. `line_number` is only used for error reporting.
pub fn parse_event_line(line: &str, line_number: usize, now: DateTime<Utc>) -> Result<EventRecord> {
    let malformed = |reason: String| IngestionError::MalformedEvent {
        line: line_number,
        content: line.to_string(),
        reason,
    };

    let fields = split_fields(line.trim_end_matches('\r')).map_err(&malformed)?;

    let number = |index: usize, name: &str| -> Result<f64> {
        fields[index]
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("{} is not a number: '{}'", name, fields[index])))
    };

    let latitude = number(4, "latitude")?;
    let longitude = number(5, "longitude")?;
    let magnitude = number(6, "magnitude")?;
    let depth_km = number(7, "depth")?;
    let station_count = fields[8].trim().parse::<u32>().map_err(|_| {
        malformed(format!("station count is not an integer: '{}'", fields[8]))
    })?;

    let raw_timestamp = fields[3].to_string();
    let timestamp = parse_timestamp(&raw_timestamp).unwrap_or_else(|| {
        debug!(
            line = line_number,
            raw = %raw_timestamp,
            "Unparseable timestamp, treating event as oldest"
        );
        EARLIEST_TIMESTAMP
    });

    Ok(EventRecord {
        source_id: fields[0].to_string(),
        event_id: fields[1].to_string(),
        version: fields[2].to_string(),
        raw_timestamp,
        position: GeoPosition::new(longitude, latitude),
        magnitude,
        depth_km,
        station_count,
        region: fields[9].to_string(),
        timestamp,
        age: EventRecord::age_from(timestamp, now),
    })
}

/// Parse a feed timestamp, falling back to RFC 3339.
///
/// Runs of whitespace are collapsed first, so space-padded days such as
/// `April  7` are accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&collapsed, FEED_TIMESTAMP_FORMAT) {
        return Some(Utc.from_utc_datetime(&ndt));
    }

    DateTime::parse_from_rfc3339(&collapsed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Split a line into exactly [`FIELD_COUNT`] fields, unquoting the quoted ones.
fn split_fields(line: &str) -> std::result::Result<Vec<&str>, String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut rest = line;

    for index in 0..FIELD_COUNT {
        let last = index == FIELD_COUNT - 1;

        let (field, after) = if QUOTED_FIELDS.contains(&index) {
            let inner = rest
                .strip_prefix('"')
                .ok_or_else(|| format!("field {} must be quoted", index + 1))?;
            let close = inner
                .find('"')
                .ok_or_else(|| format!("field {} has no closing quote", index + 1))?;
            (&inner[..close], &inner[close + 1..])
        } else {
            let end = if last {
                rest.len()
            } else {
                rest.find(',')
                    .ok_or_else(|| format!("expected {} fields, found {}", FIELD_COUNT, index + 1))?
            };
            let field = &rest[..end];
            if field.contains('"') {
                return Err(format!("field {} must not be quoted", index + 1));
            }
            (field, &rest[end..])
        };
        fields.push(field);

        rest = if last {
            if !after.is_empty() {
                return Err(format!("unexpected trailing text '{}'", after));
            }
            after
        } else {
            after
                .strip_prefix(',')
                .ok_or_else(|| format!("missing comma after field {}", index + 1))?
        };
    }

    Ok(fields)
}
