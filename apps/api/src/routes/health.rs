use axum::Json;
use serde_json::{json, Value};

use crate::schema::definition::SCHEMA_VERSION;

/// GET /health
/// Returns a simple status object with service and schema versions.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "schemaVersion": SCHEMA_VERSION,
        "service": "resume-api"
    }))
}
