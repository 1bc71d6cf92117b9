mod clock;
mod config;
mod enhance;
mod errors;
mod models;
mod pipeline;
mod repair;
mod routes;
mod schema;
mod source;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clock::SystemClock;
use crate::config::Config;
use crate::pipeline::ResumePipeline;
use crate::routes::build_router;
use crate::schema::ResumeValidator;
use crate::source::build_source;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // A schema that fails to compile is a programming error; refuse to start.
    let validator = Arc::new(ResumeValidator::new()?);
    info!("Resume schema v{} compiled", schema::definition::SCHEMA_VERSION);

    let pipeline = ResumePipeline::new(validator, Arc::new(SystemClock));

    let source = build_source(
        &config.resume_source,
        config.resume_fallback_source.as_deref(),
        config.source_timeout,
    )?;
    info!("Resume source: {}", source.describe());

    let state = AppState {
        pipeline,
        source: Arc::from(source),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
