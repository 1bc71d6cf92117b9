use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::source::{parse_body, ResumeSource, SourceError};

const MAX_RETRIES: u32 = 3;

/// Fetches a resume over HTTP. Retries 5xx responses and transport errors with
/// exponential backoff; 404 and non-JSON bodies are reported immediately so a
/// fallback source can take over.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ResumeSource for HttpSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        let mut last_error: Option<SourceError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Resume fetch attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .get(&self.url)
                .header("accept", "application/json")
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SourceError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound(self.url.clone()));
            }

            if status.is_server_error() {
                last_error = Some(SourceError::Status {
                    status: status.as_u16(),
                    location: self.url.clone(),
                });
                continue;
            }

            if !status.is_success() {
                return Err(SourceError::Status {
                    status: status.as_u16(),
                    location: self.url.clone(),
                });
            }

            let body = response.text().await?;
            debug!("Fetched {} bytes from {}", body.len(), self.url);
            return parse_body(&self.url, &body);
        }

        Err(last_error.unwrap_or_else(|| SourceError::Status {
            status: 503,
            location: self.url.clone(),
        }))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
