//! Geographic position types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
///
/// Longitude is expected in [-180, 180] and latitude in [-90, 90]. Values
/// outside those ranges are representable; the projector does not clamp
/// and the canvas rejects whatever lands off the raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPosition {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A raw coastline sample as it appears in the shore feed: `(latitude, longitude)`.
///
/// Shore data may use longitudes in [0, 360) or slightly beyond ±180, so
/// [`CoastlinePoint::position`] wraps them back into [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoastlinePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoastlinePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Normalized geographic position of this point.
    pub fn position(&self) -> GeoPosition {
        let mut lon = self.longitude;
        if lon < -180.0 {
            lon += 360.0;
        }
        if lon > 180.0 {
            lon -= 360.0;
        }
        GeoPosition::new(lon, self.latitude)
    }
}
