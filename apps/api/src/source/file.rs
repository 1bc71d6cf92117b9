use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::source::{parse_body, ResumeSource, SourceError};

/// Reads a resume from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResumeSource for FileSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        let location = self.describe();
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound(location));
            }
            Err(e) => {
                return Err(SourceError::Io {
                    location,
                    source: e,
                })
            }
        };
        debug!("Read {} bytes from {}", body.len(), location);
        parse_body(&location, &body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"basics": {{"name": "Ada"}}}}"#).unwrap();
        let value = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(value["basics"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_non_json_file_is_not_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>404</html>").unwrap();
        let err = FileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::NotJson { .. }));
    }
}
