use std::time::Duration;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// URL or file path of the resume to serve.
    pub resume_source: String,
    /// Tried when the primary source is missing or not JSON.
    pub resume_fallback_source: Option<String>,
    pub source_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            resume_source: std::env::var("RESUME_SOURCE")
                .unwrap_or_else(|_| "resume.json".to_string()),
            resume_fallback_source: optional_env("RESUME_FALLBACK_SOURCE"),
            source_timeout: Duration::from_secs(
                std::env::var("SOURCE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<u64>()
                    .context("SOURCE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
