//! Source resolution over a prioritized list of files and URLs.
//!
//! Candidates are tried in order and the first one that can be read in full
//! wins. Failures are logged and skipped; only total failure is an error.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::error::{IngestionError, Result};

/// Where a feed can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl FromStr for SourceLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(SourceLocation::Url(s.to_string()))
        } else {
            Ok(SourceLocation::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Feed text together with the candidate it came from.
#[derive(Debug, Clone)]
pub struct FetchedSource {
    pub location: SourceLocation,
    pub content: String,
}

/// Reads feeds from files and over HTTP.
pub struct SourceResolver {
    client: Client,
}

impl SourceResolver {
    /// Create a resolver whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()?;
        Ok(Self { client })
    }

    /// Read one location in full.
    pub async fn fetch(&self, location: &SourceLocation) -> Result<String> {
        match location {
            SourceLocation::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            SourceLocation::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(IngestionError::HttpStatus {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }

    /// Return the first candidate that can be read.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn fetch_first(&self, candidates: &[SourceLocation]) -> Result<FetchedSource> {
        for location in candidates {
            debug!(source = %location, "Trying source");
            match self.fetch(location).await {
                Ok(content) => {
                    info!(source = %location, bytes = content.len(), "Opened source");
                    return Ok(FetchedSource {
                        location: location.clone(),
                        content,
                    });
                }
                Err(e) => warn!(source = %location, error = %e, "Source unavailable"),
            }
        }

        Err(IngestionError::NoSourceAvailable {
            attempted: candidates.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_location() {
        assert_eq!(
            "https://example.com/feed.txt".parse::<SourceLocation>().unwrap(),
            SourceLocation::Url("https://example.com/feed.txt".to_string())
        );
        assert_eq!(
            "data/shores.txt".parse::<SourceLocation>().unwrap(),
            SourceLocation::File(PathBuf::from("data/shores.txt"))
        );
    }

    #[test]
    fn test_display_round_trips_input() {
        for s in ["http://example.com/a", "/tmp/quakes.txt"] {
            assert_eq!(s.parse::<SourceLocation>().unwrap().to_string(), s);
        }
    }
}
