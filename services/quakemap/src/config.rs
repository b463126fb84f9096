//! Layered configuration for a map run.
//!
//! Built-in defaults are overridden by an optional YAML file, which is in turn
//! overridden by environment variables and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ingestion::SourceLocation;
use quake_common::{Color, Palette, RenderConfig};
use renderer::ColoringScheme;
use serde::Deserialize;
use tracing::{debug, info};

/// Seven-day feed of magnitude 1+ events.
pub const DEFAULT_EVENT_SOURCES: &[&str] =
    &["http://earthquake.usgs.gov/earthquakes/catalogs/eqs7day-M1.txt"];

pub const DEFAULT_COASTLINE_SOURCES: &[&str] = &["shores.txt", "http://smov.org/~kst/shores.txt"];

pub const DEFAULT_OUTPUTS: &[&str] = &["quakes.png"];

/// Contents of a `--config` YAML file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mercator: Option<bool>,
    pub coloring: Option<ColoringScheme>,
    pub sources: SourcesConfig,
    pub outputs: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
    pub palette: PaletteConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub events: Vec<String>,
    pub coastline: Vec<String>,
}

/// Layer colors as `#RRGGBB` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: Option<String>,
    pub axis: Option<String>,
    pub shore: Option<String>,
    pub depth: Option<String>,
}

impl MapConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl PaletteConfig {
    fn resolve(&self) -> Result<Palette> {
        let defaults = Palette::default();
        Ok(Palette {
            background: hex_or(&self.background, defaults.background, "background")?,
            axis: hex_or(&self.axis, defaults.axis, "axis")?,
            shore: hex_or(&self.shore, defaults.shore, "shore")?,
            depth: hex_or(&self.depth, defaults.depth, "depth")?,
        })
    }
}

fn hex_or(value: &Option<String>, default: Color, name: &str) -> Result<Color> {
    match value {
        None => Ok(default),
        Some(hex) => Color::from_hex(hex)
            .ok_or_else(|| anyhow!("palette.{} is not a #RRGGBB color: '{}'", name, hex)),
    }
}

/// Parse a `--coloring` value.
pub fn parse_coloring(s: &str) -> std::result::Result<ColoringScheme, String> {
    match s.to_lowercase().as_str() {
        "recency" | "age" => Ok(ColoringScheme::Recency),
        "magnitude" => Ok(ColoringScheme::Magnitude),
        other => Err(format!(
            "unknown coloring '{}', expected 'recency' or 'magnitude'",
            other
        )),
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mercator: bool,
    pub coloring: Option<ColoringScheme>,
    pub events: Vec<String>,
    pub coastline: Vec<String>,
    pub outputs: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub render: RenderConfig,
    pub palette: Palette,
    pub coloring: ColoringScheme,
    pub event_sources: Vec<SourceLocation>,
    pub coastline_sources: Vec<SourceLocation>,
    pub outputs: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: MapConfig, overrides: Overrides) -> Result<Self> {
        let defaults = RenderConfig::default();
        let render = RenderConfig::new(
            overrides.width.or(file.width).unwrap_or(defaults.width),
            overrides.height.or(file.height).unwrap_or(defaults.height),
            overrides.mercator || file.mercator.unwrap_or(defaults.mercator),
        )
        .context("Invalid render configuration")?;

        let settings = Self {
            render,
            palette: file.palette.resolve()?,
            coloring: overrides.coloring.or(file.coloring).unwrap_or_default(),
            event_sources: locations(first_non_empty(
                overrides.events,
                file.sources.events,
                DEFAULT_EVENT_SOURCES,
            )),
            coastline_sources: locations(first_non_empty(
                overrides.coastline,
                file.sources.coastline,
                DEFAULT_COASTLINE_SOURCES,
            )),
            outputs: first_non_empty(
                overrides.outputs,
                file.outputs,
                &DEFAULT_OUTPUTS.iter().map(|p| PathBuf::from(*p)).collect::<Vec<_>>(),
            ),
            summary: overrides.summary.or(file.summary),
        };
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }
}

fn first_non_empty<T, D>(cli: Vec<T>, file: Vec<T>, defaults: &[D]) -> Vec<T>
where
    D: Clone + Into<T>,
{
    if !cli.is_empty() {
        cli
    } else if !file.is_empty() {
        file
    } else {
        defaults.iter().cloned().map(Into::into).collect()
    }
}

fn locations(values: Vec<String>) -> Vec<SourceLocation> {
    values
        .iter()
        .filter_map(|s| s.parse::<SourceLocation>().ok())
        .collect()
}
