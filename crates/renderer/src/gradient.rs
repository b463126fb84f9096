//! Event color gradients.
//!
//! Two strategies are available:
//! - Recency (default): red for events that just happened, blue at 3.5 days,
//!   green from 7 days on.
//! - Magnitude: green up to M1, blue at M5, red from M9 on.
//!
//! Both are piecewise linear and continuous. Magnitudes up to M1 use full
//! intensity green (0, 255, 0) so the ramp joins its first segment; older
//! renderings used a darker green there and jumped at M1.

use quake_common::{Color, EventRecord};
use serde::{Deserialize, Serialize};

/// Age at which the recency gradient reaches pure blue.
pub const RECENCY_MIDPOINT_DAYS: f64 = 3.5;

/// Age from which the recency gradient stays pure green.
pub const RECENCY_HORIZON_DAYS: f64 = 2.0 * RECENCY_MIDPOINT_DAYS;

/// Color an event by age in days.
///
/// Ages are clamped to [0, 7]; future timestamps count as brand new.
pub fn recency_color(age_days: f64) -> Color {
    let age = age_days.clamp(0.0, RECENCY_HORIZON_DAYS);
    if age <= RECENCY_MIDPOINT_DAYS {
        let blue = ramp(age / RECENCY_MIDPOINT_DAYS);
        Color::new(255 - blue, 0, blue)
    } else {
        let green = ramp((age - RECENCY_MIDPOINT_DAYS) / RECENCY_MIDPOINT_DAYS);
        Color::new(0, green, 255 - green)
    }
}

/// Scale a 0..1 fraction onto 0..=255 using 256 steps, saturating at the top.
fn ramp(fraction: f64) -> u8 {
    (fraction * 256.0).round().clamp(0.0, 255.0) as u8
}

/// Color an event by magnitude.
pub fn magnitude_color(magnitude: f64) -> Color {
    match magnitude {
        m if m <= 1.0 => Color::GREEN,
        m if m <= 5.0 => {
            let blue = ((m - 1.0) / 4.0 * 255.0) as u8;
            Color::new(0, 255 - blue, blue)
        }
        m if m <= 9.0 => {
            let red = ((m - 5.0) / 4.0 * 255.0) as u8;
            Color::new(red, 0, 255 - red)
        }
        _ => Color::RED,
    }
}

/// Strategy for choosing a marker color.
pub trait ColorMapper {
    fn event_color(&self, event: &EventRecord) -> Color;
}

/// Colors events by how long ago they happened.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecencyGradient;

impl ColorMapper for RecencyGradient {
    fn event_color(&self, event: &EventRecord) -> Color {
        recency_color(event.age_days())
    }
}

/// Colors events by magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagnitudeGradient;

impl ColorMapper for MagnitudeGradient {
    fn event_color(&self, event: &EventRecord) -> Color {
        magnitude_color(event.magnitude)
    }
}

/// Selectable coloring scheme, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColoringScheme {
    #[default]
    Recency,
    Magnitude,
}

impl ColorMapper for ColoringScheme {
    fn event_color(&self, event: &EventRecord) -> Color {
        match self {
            ColoringScheme::Recency => RecencyGradient.event_color(event),
            ColoringScheme::Magnitude => MagnitudeGradient.event_color(event),
        }
    }
}
