use axum::{extract::State, Json};
use serde_json::Value;

use crate::schema::{schema_info, SchemaInfo};
use crate::state::AppState;

/// GET /api/v1/schema
pub async fn handle_get_schema(State(state): State<AppState>) -> Json<Value> {
    Json(state.pipeline.validator().schema().clone())
}

/// GET /api/v1/schema/info
pub async fn handle_schema_info() -> Json<SchemaInfo> {
    Json(schema_info())
}
