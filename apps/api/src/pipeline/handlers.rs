use anyhow::anyhow;
use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::pipeline::{ProcessedResume, ResumePipeline};
use crate::schema::ValidationResult;
use crate::state::AppState;

/// Runs the pipeline off the async runtime; it is CPU-bound.
async fn run_pipeline(pipeline: ResumePipeline, raw: Value) -> Result<ProcessedResume, AppError> {
    tokio::task::spawn_blocking(move || pipeline.process(&raw))
        .await
        .map_err(|e| AppError::Internal(anyhow!("resume pipeline task failed: {e}")))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ProcessedResume>, AppError> {
    info!("Loading resume from {}", state.source.describe());
    let raw = state.source.fetch().await?;
    let processed = run_pipeline(state.pipeline.clone(), raw).await?;
    Ok(Json(processed))
}

/// POST /api/v1/resume/process
pub async fn handle_process(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<ProcessedResume>, AppError> {
    let processed = run_pipeline(state.pipeline.clone(), raw).await?;
    Ok(Json(processed))
}

/// POST /api/v1/resume/validate
/// Validates the body as submitted, without repair.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Json<ValidationResult> {
    Json(state.pipeline.validator().validate(&raw))
}

/// POST /api/v1/resume/repair
pub async fn handle_repair(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Json<ResumeDocument> {
    Json(state.pipeline.repair(&raw))
}
