//! Map projection for the quake map.
//!
//! Converts geographic positions into canvas pixels and traces the
//! latitude/longitude grid at canvas resolution.

pub mod graticule;
pub mod projector;

pub use graticule::{
    graticule_lines, trace_meridian, trace_parallel, GridLine, GridTrace, GRATICULE_SPACING_DEG,
};
pub use projector::{project, project_with_mode, PixelPoint, ProjectionMode};
