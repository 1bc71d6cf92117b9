use std::sync::Arc;

use crate::pipeline::ResumePipeline;
use crate::source::ResumeSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ResumePipeline,
    /// Where `GET /api/v1/resume` loads from, fallback chain included.
    pub source: Arc<dyn ResumeSource>,
}
