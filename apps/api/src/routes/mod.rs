pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::schema::handlers as schema_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume pipeline
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/resume/process", post(handlers::handle_process))
        .route("/api/v1/resume/validate", post(handlers::handle_validate))
        .route("/api/v1/resume/repair", post(handlers::handle_repair))
        // Schema introspection
        .route("/api/v1/schema", get(schema_handlers::handle_get_schema))
        .route("/api/v1/schema/info", get(schema_handlers::handle_schema_info))
        .with_state(state)
}
