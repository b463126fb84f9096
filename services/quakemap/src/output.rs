//! Persisting the rendered map and the optional run summary.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use quake_common::{EventSummary, RenderConfig};
use renderer::{ColoringScheme, RenderStats};
use serde::Serialize;
use tracing::{info, warn};

/// Write `bytes` to the first candidate path that accepts them.
pub async fn save_first_writable(bytes: &[u8], candidates: &[PathBuf]) -> Result<PathBuf> {
    for path in candidates {
        match tokio::fs::write(path, bytes).await {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "Saved map image");
                return Ok(path.clone());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Output path not writable"),
        }
    }
    bail!(
        "No writable output path among {} candidate(s)",
        candidates.len()
    )
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub config: RenderConfig,
    pub coloring: ColoringScheme,
    pub event_source: String,
    pub coastline_source: String,
    pub feed_lines: usize,
    /// Absent when the feed had no events.
    pub events: Option<EventSummary>,
    pub render: RenderStats,
    pub shore_coverage_percent: f64,
    pub output: PathBuf,
}

pub async fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_vec_pretty(summary).context("Failed to serialize run summary")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write run summary: {}", path.display()))?;
    info!(path = %path.display(), "Wrote run summary");
    Ok(())
}
