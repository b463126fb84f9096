//! Render configuration consumed by the projection and rendering engine.

use serde::{Deserialize, Serialize};

use crate::error::{QuakeError, QuakeResult};

/// Canvas size and projection mode.
///
/// Built once per run and passed by reference to every engine function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Plain equirectangular mapping when true, globe foreshortening otherwise.
    #[serde(default)]
    pub mercator: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            mercator: false,
        }
    }
}

impl RenderConfig {
    pub fn new(width: u32, height: u32, mercator: bool) -> QuakeResult<Self> {
        let config = Self {
            width,
            height,
            mercator,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject degenerate canvases.
    pub fn validate(&self) -> QuakeResult<()> {
        if self.width == 0 {
            return Err(QuakeError::InvalidConfig {
                param: "width".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.height == 0 {
            return Err(QuakeError::InvalidConfig {
                param: "height".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Pixels per degree of longitude.
    pub fn pixels_per_degree(&self) -> f64 {
        self.width as f64 / 360.0
    }
}
