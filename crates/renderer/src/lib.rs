//! Raster rendering for the quake map.
//!
//! - Canvas: bounds-checked RGB raster
//! - Gradients: recency and magnitude color strategies
//! - Markers: magnitude discs with depth stems
//! - Compositor: background, coastline, grid and event passes
//! - PNG: indexed/RGB encoding of the finished canvas

pub mod canvas;
pub mod compositor;
pub mod gradient;
pub mod marker;
pub mod png;

pub use canvas::Canvas;
pub use compositor::{draw_order, Compositor, RenderStats};
pub use gradient::{
    magnitude_color, recency_color, ColorMapper, ColoringScheme, MagnitudeGradient,
    RecencyGradient,
};
pub use marker::{depth_stem_length, marker_radius, MarkerPixels, MarkerRenderer};
pub use png::encode_png;
