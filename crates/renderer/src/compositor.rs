//! Layered map compositing.
//!
//! Passes run in a fixed order and each one finishes before the next starts:
//! 1. background fill
//! 2. coastline points
//! 3. latitude/longitude grid
//! 4. event markers, oldest first
//!
//! Later passes overwrite earlier ones, so the most recent event wins any
//! pixel shared by several markers.

use std::cmp::Reverse;

use projection::{graticule_lines, project};
use quake_common::{CoastlinePoint, EventRecord, Palette, RenderConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::gradient::ColorMapper;
use crate::marker::MarkerRenderer;

/// Counters collected while compositing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Coastline points processed.
    pub shore_points: usize,
    /// Pixels newly painted in the shore color.
    pub shore_pixels: usize,
    /// Grid positions that landed on the canvas.
    pub grid_pixels: usize,
    pub events_drawn: usize,
    /// Marker and stem pixels written, counting overdraw.
    pub event_pixels: usize,
}

impl RenderStats {
    /// Share of coastline points that painted a new pixel, in percent.
    pub fn shore_coverage_percent(&self) -> f64 {
        if self.shore_points == 0 {
            return 0.0;
        }
        self.shore_pixels as f64 / self.shore_points as f64 * 100.0
    }
}

/// Events in drawing order: oldest first, ties kept in input order.
pub fn draw_order(events: &[EventRecord]) -> Vec<&EventRecord> {
    let mut ordered: Vec<&EventRecord> = events.iter().collect();
    ordered.sort_by_key(|event| Reverse(event.age));
    ordered
}

/// Runs the compositing passes for one map.
pub struct Compositor<'a> {
    config: &'a RenderConfig,
    palette: Palette,
    coloring: &'a dyn ColorMapper,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a RenderConfig, palette: Palette, coloring: &'a dyn ColorMapper) -> Self {
        Self {
            config,
            palette,
            coloring,
        }
    }

    /// Render the complete map.
    pub fn render(
        &self,
        events: &[EventRecord],
        coastline: &[CoastlinePoint],
    ) -> (Canvas, RenderStats) {
        let mut canvas = Canvas::for_config(self.config, self.palette.background);
        let mut stats = RenderStats::default();

        self.paint_background(&mut canvas);
        self.paint_coastline(&mut canvas, coastline, &mut stats);
        self.paint_graticule(&mut canvas, &mut stats);
        self.paint_events(&mut canvas, events, &mut stats);

        (canvas, stats)
    }

    pub fn paint_background(&self, canvas: &mut Canvas) {
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            "Initializing blank canvas"
        );
        canvas.fill(self.palette.background);
    }

    /// Plot coastline points, counting only pixels that change color.
    pub fn paint_coastline(
        &self,
        canvas: &mut Canvas,
        coastline: &[CoastlinePoint],
        stats: &mut RenderStats,
    ) {
        let shore = self.palette.shore;
        for point in coastline {
            stats.shore_points += 1;
            let pixel = project(point.position(), self.config);
            match canvas.pixel_at(pixel) {
                Some(existing) if existing != shore => {
                    canvas.plot(pixel, shore);
                    stats.shore_pixels += 1;
                }
                _ => {}
            }
        }
        info!(
            shore_pixels = stats.shore_pixels,
            shore_points = stats.shore_points,
            coverage = %format!("{:.2}%", stats.shore_coverage_percent()),
            "Plotted coastline"
        );
    }

    /// Plot every meridian and parallel at grid spacing.
    pub fn paint_graticule(&self, canvas: &mut Canvas, stats: &mut RenderStats) {
        let axis = self.palette.axis;
        for line in graticule_lines() {
            for position in line.trace(self.config) {
                if canvas.plot(project(position, self.config), axis) {
                    stats.grid_pixels += 1;
                }
            }
        }
        debug!(grid_pixels = stats.grid_pixels, "Plotted grid");
    }

    /// Draw markers so that more recent events end up on top.
    pub fn paint_events(&self, canvas: &mut Canvas, events: &[EventRecord], stats: &mut RenderStats) {
        let markers = MarkerRenderer::new(self.config, self.coloring, self.palette.depth);
        for event in draw_order(events) {
            let written = markers.draw(event, canvas);
            stats.events_drawn += 1;
            stats.event_pixels += written.disc + written.stem;
        }
        info!(
            events = stats.events_drawn,
            pixels = stats.event_pixels,
            "Drew event markers"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::event_at;

    #[test]
    fn test_draw_order_oldest_first() {
        let events = vec![
            event_at(0.0, 0.0, 1.0, 0.0, 1.0),
            event_at(1.0, 0.0, 1.0, 0.0, 5.0),
            event_at(2.0, 0.0, 1.0, 0.0, 0.5),
        ];
        let ordered: Vec<f64> = draw_order(&events)
            .iter()
            .map(|e| e.position.longitude)
            .collect();
        assert_eq!(ordered, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_draw_order_is_stable_for_equal_ages() {
        let events = vec![
            event_at(10.0, 0.0, 1.0, 0.0, 2.0),
            event_at(20.0, 0.0, 1.0, 0.0, 2.0),
        ];
        let ordered = draw_order(&events);
        assert_eq!(ordered[0].position.longitude, 10.0);
        assert_eq!(ordered[1].position.longitude, 20.0);
    }

    #[test]
    fn test_coverage_percent() {
        let stats = RenderStats {
            shore_points: 4,
            shore_pixels: 3,
            ..Default::default()
        };
        assert_eq!(stats.shore_coverage_percent(), 75.0);
        assert_eq!(RenderStats::default().shore_coverage_percent(), 0.0);
    }
}
