//! Resume sources: the fetch boundary in front of the pipeline.
//!
//! A source turns a location (URL or file path) into an in-memory JSON value.
//! Network timeouts, retries and primary→secondary fallback live here, never in
//! the pipeline itself.

pub mod file;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub use file::FileSource;
pub use http::HttpSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("resume not found at {0}")]
    NotFound(String),

    #[error("resume at {location} is not valid JSON: {reason}")]
    NotJson { location: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {location}")]
    Status { status: u16, location: String },

    #[error("I/O error reading {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Errors after which a secondary source is worth trying.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceError::NotFound(_) | SourceError::NotJson { .. })
    }
}

#[async_trait]
pub trait ResumeSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, SourceError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Tries `primary`, then `secondary` if the primary is missing or not JSON.
pub struct FallbackSource {
    primary: Box<dyn ResumeSource>,
    secondary: Box<dyn ResumeSource>,
}

impl FallbackSource {
    pub fn new(primary: Box<dyn ResumeSource>, secondary: Box<dyn ResumeSource>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl ResumeSource for FallbackSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        match self.primary.fetch().await {
            Err(e) if e.is_recoverable() => {
                warn!(
                    "Primary resume source failed ({e}), falling back to {}",
                    self.secondary.describe()
                );
                self.secondary.fetch().await
            }
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} (fallback: {})",
            self.primary.describe(),
            self.secondary.describe()
        )
    }
}

/// HTTP(S) URLs become [`HttpSource`]s; anything else is a file path.
pub fn source_from_location(
    location: &str,
    timeout: std::time::Duration,
) -> Result<Box<dyn ResumeSource>, SourceError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Builds the configured source chain.
pub fn build_source(
    primary: &str,
    fallback: Option<&str>,
    timeout: std::time::Duration,
) -> Result<Box<dyn ResumeSource>, SourceError> {
    let primary_source = source_from_location(primary, timeout)?;
    let source: Box<dyn ResumeSource> = match fallback {
        Some(secondary) => Box::new(FallbackSource::new(
            primary_source,
            source_from_location(secondary, timeout)?,
        )),
        None => primary_source,
    };
    Ok(source)
}

/// Parses a body as JSON, tagging failures with the location.
pub(crate) fn parse_body(location: &str, body: &str) -> Result<Value, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::NotJson {
        location: location.to_string(),
        reason: e.to_string(),
    })
}
