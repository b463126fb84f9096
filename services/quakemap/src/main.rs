//! Quake map renderer.
//!
//! Fetches the past week of earthquakes and a coastline outline, draws both
//! onto a world map and saves it as a PNG:
//! - Events and coastline are read from the first available source
//! - Markers are sized by magnitude, colored by age or magnitude, and carry a
//!   stem proportional to depth
//! - The image is written to the first writable output path

mod config;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use ingestion::{parse_coastline, parse_event_feed, SourceResolver};
use quake_common::EventSummary;
use renderer::{encode_png, ColoringScheme, Compositor};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{parse_coloring, MapConfig, Overrides, Settings};
use output::{save_first_writable, write_summary, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "quakemap")]
#[command(about = "Render recent earthquakes onto a world map")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "QUAKEMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, env = "QUAKEMAP_WIDTH")]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long, env = "QUAKEMAP_HEIGHT")]
    height: Option<u32>,

    /// Plain equirectangular projection instead of globe mode
    #[arg(long, env = "QUAKEMAP_MERCATOR")]
    mercator: bool,

    /// Marker coloring: recency or magnitude
    #[arg(long, env = "QUAKEMAP_COLORING", value_parser = parse_coloring)]
    coloring: Option<ColoringScheme>,

    /// Event feed sources (files or URLs), tried in order
    #[arg(long = "events", env = "QUAKEMAP_EVENTS", value_delimiter = ',')]
    events: Vec<String>,

    /// Coastline sources (files or URLs), tried in order
    #[arg(long = "coastline", env = "QUAKEMAP_COASTLINE", value_delimiter = ',')]
    coastline: Vec<String>,

    /// Output image paths, tried in order
    #[arg(short, long = "output", env = "QUAKEMAP_OUTPUT", value_delimiter = ',')]
    outputs: Vec<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long, env = "QUAKEMAP_SUMMARY")]
    summary: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "QUAKEMAP_HTTP_TIMEOUT", default_value = "30")]
    http_timeout: u64,

    /// Log level
    #[arg(long, env = "QUAKEMAP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "QUAKEMAP_LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            mercator: self.mercator,
            coloring: self.coloring,
            events: self.events.clone(),
            coastline: self.coastline.clone(),
            outputs: self.outputs.clone(),
            summary: self.summary.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let file_config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    let settings = Settings::resolve(file_config, args.overrides())?;

    info!(
        width = settings.render.width,
        height = settings.render.height,
        mercator = settings.render.mercator,
        coloring = ?settings.coloring,
        "Starting quake map"
    );

    // All event ages are measured against this instant
    let now = Utc::now();

    let resolver = SourceResolver::new(Duration::from_secs(args.http_timeout))
        .context("Failed to create HTTP client")?;

    let event_source = resolver
        .fetch_first(&settings.event_sources)
        .await
        .context("No event feed available")?;
    let feed = parse_event_feed(&event_source.content, now)
        .with_context(|| format!("Failed to parse event feed from {}", event_source.location))?;

    let event_summary = EventSummary::from_events(&feed.events);
    match &event_summary {
        Some(s) => info!(
            events = s.count,
            undated = s.undated,
            latitude = %format!("{}..{}", s.min_latitude, s.max_latitude),
            longitude = %format!("{}..{}", s.min_longitude, s.max_longitude),
            magnitude = %format!("{}..{}", s.min_magnitude, s.max_magnitude),
            age_days = %format!("{:.3}..{:.3}", s.min_age_days, s.max_age_days),
            "Event feed summary"
        ),
        None => info!("Event feed contains no events"),
    }

    let coastline_source = resolver
        .fetch_first(&settings.coastline_sources)
        .await
        .context("No coastline data available")?;
    let coastline = parse_coastline(&coastline_source.content).with_context(|| {
        format!("Failed to parse coastline from {}", coastline_source.location)
    })?;

    let compositor = Compositor::new(&settings.render, settings.palette, &settings.coloring);
    let (canvas, stats) = compositor.render(&feed.events, &coastline);

    let png = encode_png(&canvas).context("Failed to encode map image")?;
    let output = save_first_writable(&png, &settings.outputs).await?;

    if let Some(path) = &settings.summary {
        let summary = RunSummary {
            generated_at: now,
            config: settings.render,
            coloring: settings.coloring,
            event_source: event_source.location.to_string(),
            coastline_source: coastline_source.location.to_string(),
            feed_lines: feed.line_count,
            events: event_summary,
            render: stats,
            shore_coverage_percent: stats.shore_coverage_percent(),
            output: output.clone(),
        };
        write_summary(path, &summary).await?;
    }

    info!(path = %output.display(), "Quake map complete");
    Ok(())
}
