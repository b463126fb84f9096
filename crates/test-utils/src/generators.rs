//! Builders for synthetic events and coastlines.

use chrono::{DateTime, Duration, TimeZone, Utc};
use quake_common::{CoastlinePoint, EventRecord, GeoPosition};

/// Fixed reference "now" used by generated events.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 4, 8, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Build an event at `(lon, lat)` that is `age_days` old relative to [`reference_now`].
pub fn event_at(lon: f64, lat: f64, magnitude: f64, depth_km: f64, age_days: f64) -> EventRecord {
    let now = reference_now();
    let age = Duration::seconds((age_days * 86_400.0).round() as i64);
    let timestamp = now - age;
    EventRecord {
        source_id: "us".to_string(),
        event_id: format!("{:.2}_{:.2}_{:.1}", lon, lat, age_days),
        version: "1".to_string(),
        raw_timestamp: timestamp.to_rfc3339(),
        position: GeoPosition::new(lon, lat),
        magnitude,
        depth_km,
        station_count: 10,
        region: "Test Region".to_string(),
        timestamp,
        age: EventRecord::age_from(timestamp, now),
    }
}

/// Points along a single parallel, `count` samples evenly spaced in longitude.
pub fn coastline_along_parallel(latitude: f64, count: usize) -> Vec<CoastlinePoint> {
    (0..count)
        .map(|i| {
            let lon = -180.0 + 360.0 * i as f64 / count.max(1) as f64;
            CoastlinePoint::new(latitude, lon)
        })
        .collect()
}
