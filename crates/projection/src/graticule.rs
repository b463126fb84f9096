//! Latitude/longitude grid tracing.
//!
//! A traced line is a finite iterator of geographic positions spaced one
//! canvas pixel apart along the line. Meridians run from the north pole
//! southward one row at a time; parallels run from the antimeridian eastward
//! one column at a time. Positions are computed from the step index, so a
//! meridian yields exactly `height` positions and a parallel exactly `width`,
//! never stepping past -90 latitude or +180 longitude.

use std::iter::FusedIterator;

use quake_common::{GeoPosition, RenderConfig};

/// Spacing between grid lines in degrees.
pub const GRATICULE_SPACING_DEG: f64 = 15.0;

/// A single grid line at a fixed longitude or latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridLine {
    Meridian(f64),
    Parallel(f64),
}

impl GridLine {
    /// Trace this line at the resolution of `config`.
    pub fn trace(&self, config: &RenderConfig) -> GridTrace {
        match *self {
            GridLine::Meridian(longitude) => trace_meridian(longitude, config),
            GridLine::Parallel(latitude) => trace_parallel(latitude, config),
        }
    }
}

/// Iterator over positions along one [`GridLine`].
///
/// Calling [`GridLine::trace`] again with the same config yields the same
/// sequence.
#[derive(Debug, Clone)]
pub struct GridTrace {
    line: GridLine,
    step: f64,
    index: u32,
    count: u32,
}

impl GridTrace {
    fn position_at(&self, index: u32) -> GeoPosition {
        let offset = index as f64 * self.step;
        match self.line {
            GridLine::Meridian(longitude) => GeoPosition::new(longitude, 90.0 - offset),
            GridLine::Parallel(latitude) => GeoPosition::new(-180.0 + offset, latitude),
        }
    }
}

impl Iterator for GridTrace {
    type Item = GeoPosition;

    fn next(&mut self) -> Option<GeoPosition> {
        if self.index >= self.count {
            return None;
        }
        let position = self.position_at(self.index);
        self.index += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridTrace {}

impl FusedIterator for GridTrace {}

/// Trace the meridian at `longitude` from +90 southward, one canvas row per step.
pub fn trace_meridian(longitude: f64, config: &RenderConfig) -> GridTrace {
    GridTrace {
        line: GridLine::Meridian(longitude),
        step: 180.0 / config.height as f64,
        index: 0,
        count: config.height,
    }
}

/// Trace the parallel at `latitude` from -180 eastward, one canvas column per step.
pub fn trace_parallel(latitude: f64, config: &RenderConfig) -> GridTrace {
    GridTrace {
        line: GridLine::Parallel(latitude),
        step: 360.0 / config.width as f64,
        index: 0,
        count: config.width,
    }
}

/// Every grid line of the map: 25 meridians then 13 parallels, both ends included.
pub fn graticule_lines() -> impl Iterator<Item = GridLine> {
    let meridians = (0..=(360.0 / GRATICULE_SPACING_DEG) as u32)
        .map(|i| GridLine::Meridian(-180.0 + i as f64 * GRATICULE_SPACING_DEG));
    let parallels = (0..=(180.0 / GRATICULE_SPACING_DEG) as u32)
        .map(|i| GridLine::Parallel(-90.0 + i as f64 * GRATICULE_SPACING_DEG));
    meridians.chain(parallels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meridian_starts_at_north_pole() {
        let config = RenderConfig::new(360, 180, true).unwrap();
        let mut trace = trace_meridian(30.0, &config);
        assert_eq!(trace.next(), Some(GeoPosition::new(30.0, 90.0)));
        assert_eq!(trace.next(), Some(GeoPosition::new(30.0, 89.0)));
    }

    #[test]
    fn test_parallel_starts_at_antimeridian() {
        let config = RenderConfig::new(720, 360, true).unwrap();
        let mut trace = trace_parallel(-45.0, &config);
        assert_eq!(trace.next(), Some(GeoPosition::new(-180.0, -45.0)));
        assert_eq!(trace.next(), Some(GeoPosition::new(-179.5, -45.0)));
    }

    #[test]
    fn test_graticule_line_counts() {
        let lines: Vec<GridLine> = graticule_lines().collect();
        let meridians = lines
            .iter()
            .filter(|l| matches!(l, GridLine::Meridian(_)))
            .count();
        let parallels = lines
            .iter()
            .filter(|l| matches!(l, GridLine::Parallel(_)))
            .count();
        assert_eq!(meridians, 25);
        assert_eq!(parallels, 13);
        assert_eq!(lines.first(), Some(&GridLine::Meridian(-180.0)));
        assert_eq!(lines.last(), Some(&GridLine::Parallel(90.0)));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let config = RenderConfig::new(10, 4, false).unwrap();
        let mut trace = trace_meridian(0.0, &config);
        assert_eq!(trace.len(), 4);
        trace.next();
        assert_eq!(trace.len(), 3);
    }
}
