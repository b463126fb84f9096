//! Geographic to pixel mapping.
//!
//! Two modes share the same linear mapping onto the canvas:
//! - Globe (default): longitude is scaled by `sqrt(1 - (lat/90)^2)` first,
//!   which pulls meridians toward the central meridian near the poles and
//!   suggests a foreshortened sphere.
//! - Equirectangular: longitude and latitude are used as-is. The command line
//!   calls this mode "mercator" for historical reasons; it is not a Mercator
//!   projection.
//!
//! The mapping never clamps. Positions on the southern or eastern edge of
//! the globe land on `y == height` or `x == width`, and callers bounds-check
//! before touching the canvas.

use quake_common::{GeoPosition, RenderConfig};

/// Distortion model applied before the linear mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    Globe,
    Equirectangular,
}

impl ProjectionMode {
    pub fn from_mercator_flag(mercator: bool) -> Self {
        if mercator {
            ProjectionMode::Equirectangular
        } else {
            ProjectionMode::Globe
        }
    }
}

/// Integer canvas coordinate produced by projecting a [`GeoPosition`].
///
/// Only the projector creates these, so every point traces back to a
/// geographic position. Coordinates may lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    x: i64,
    y: i64,
}

impl PixelPoint {
    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }
}

/// Project a position onto the canvas described by `config`.
///
/// Pure and deterministic in `(position, width, height, mercator)`.
pub fn project(position: GeoPosition, config: &RenderConfig) -> PixelPoint {
    project_with_mode(
        position,
        config.width,
        config.height,
        ProjectionMode::from_mercator_flag(config.mercator),
    )
}

/// Project with explicit dimensions and mode.
pub fn project_with_mode(
    position: GeoPosition,
    width: u32,
    height: u32,
    mode: ProjectionMode,
) -> PixelPoint {
    let latitude = position.latitude;
    let longitude = match mode {
        ProjectionMode::Globe => {
            let y1 = latitude / 90.0;
            // Rounding can push 1 - y1^2 a hair below zero at the poles.
            position.longitude * (1.0 - y1 * y1).max(0.0).sqrt()
        }
        ProjectionMode::Equirectangular => position.longitude,
    };

    // Float to int casts saturate, NaN becomes 0
    let x = ((longitude + 180.0) / 360.0 * width as f64).floor() as i64;
    let y = ((latitude + 90.0) / 180.0 * height as f64).floor() as i64;

    // Flip so north is at the top of the image
    PixelPoint {
        x,
        y: (height as i64).saturating_sub(y),
    }
}
