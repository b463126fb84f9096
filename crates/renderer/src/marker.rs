//! Event markers: a filled disc sized by magnitude plus a depth stem.

use std::ops::RangeInclusive;

use projection::{project, PixelPoint};
use quake_common::{Color, EventRecord, RenderConfig};

use crate::canvas::Canvas;
use crate::gradient::ColorMapper;

/// Disc radius is magnitude times this many degrees of longitude.
const DEGREES_PER_MAGNITUDE: f64 = 1.0 / 5.0;

/// Empirically, 1 km of depth is drawn as 0.05 degrees of longitude.
const DEGREES_PER_DEPTH_KM: f64 = 0.05;

/// Disc radius in whole pixels for `magnitude` on this canvas.
pub fn marker_radius(magnitude: f64, config: &RenderConfig) -> i64 {
    let radius = (magnitude * config.pixels_per_degree() * DEGREES_PER_MAGNITUDE).round() as i64;
    radius.max(0)
}

/// Stem length in whole pixels for `depth_km` on this canvas.
pub fn depth_stem_length(depth_km: f64, config: &RenderConfig) -> i64 {
    let length = (depth_km * config.pixels_per_degree() * DEGREES_PER_DEPTH_KM).round() as i64;
    length.max(0)
}

/// Pixel counts written for one marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerPixels {
    pub disc: usize,
    pub stem: usize,
}

/// Draws single events onto a canvas.
pub struct MarkerRenderer<'a> {
    config: &'a RenderConfig,
    coloring: &'a dyn ColorMapper,
    depth_color: Color,
}

impl<'a> MarkerRenderer<'a> {
    pub fn new(config: &'a RenderConfig, coloring: &'a dyn ColorMapper, depth_color: Color) -> Self {
        Self {
            config,
            coloring,
            depth_color,
        }
    }

    /// Draw `event` as a disc and then its depth stem.
    ///
    /// The stem runs straight down from just below the disc center, so it
    /// overwrites the lower half of the disc's center column. Both shapes are
    /// clipped to the canvas before any pixel is visited.
    pub fn draw(&self, event: &EventRecord, canvas: &mut Canvas) -> MarkerPixels {
        let center = project(event.position, self.config);
        let color = self.coloring.event_color(event);

        let disc = draw_disc(
            canvas,
            center,
            marker_radius(event.magnitude, self.config),
            color,
        );
        // Rows p.y+1 ..= p.y+len, not from p.y itself: the center pixel
        // always keeps the marker color, and zero depth draws nothing.
        let stem = draw_stem(
            canvas,
            center,
            depth_stem_length(event.depth_km, self.config),
            self.depth_color,
        );

        MarkerPixels { disc, stem }
    }
}

/// Fill every pixel with `dx^2 + dy^2 <= radius^2` around `center`.
///
/// Only the part of the bounding square that lies on the canvas is visited.
fn draw_disc(canvas: &mut Canvas, center: PixelPoint, radius: i64, color: Color) -> usize {
    let (cx, cy, r) = (center.x() as i128, center.y() as i128, radius as i128);
    let r2 = r * r;
    let columns = clip_span(cx - r, cx + r, canvas.width());
    let mut written = 0;
    for y in clip_span(cy - r, cy + r, canvas.height()) {
        let dy = y as i128 - cy;
        for x in columns.clone() {
            let dx = x as i128 - cx;
            if dx * dx + dy * dy <= r2 && canvas.set(x, y, color) {
                written += 1;
            }
        }
    }
    written
}

/// Vertical line of `length` pixels below `center`.
fn draw_stem(canvas: &mut Canvas, center: PixelPoint, length: i64, color: Color) -> usize {
    let cy = center.y() as i128;
    clip_span(cy + 1, cy + length as i128, canvas.height())
        .filter(|&y| canvas.set(center.x(), y, color))
        .count()
}

/// Canvas indices in `lo..=hi` along an axis `extent` pixels long.
fn clip_span(lo: i128, hi: i128, extent: u32) -> RangeInclusive<i64> {
    let extent = extent as i128;
    let lo = lo.clamp(0, extent) as i64;
    let hi = hi.clamp(-1, extent - 1) as i64;
    lo..=hi
}
