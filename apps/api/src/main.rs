mod collection;
mod config;
mod errors;
mod export;
mod extraction;
mod ingest;
mod matching;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::{NewJob, NewResume};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentMatch API v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.clone());
    {
        let session = state.session.lock().await;
        info!(
            "Match session {} ({} backend)",
            session.metrics().run_id,
            session.settings().backend
        );
    }

    preload(&state, &config).await;

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the configured CSV sources. An unavailable source leaves its
/// collection empty and the service starts anyway.
async fn preload(state: &AppState, config: &Config) {
    if let Some(path) = &config.jobs_csv {
        match ingest::read_rows(path, config.load_limit).await {
            Ok(rows) => {
                let mut session = state.session.lock().await;
                session.load_jobs(rows.into_iter().map(NewJob::from_description));
            }
            Err(e) => warn!("Skipping job preload: {e}"),
        }
    }
    if let Some(path) = &config.resumes_csv {
        match ingest::read_rows(path, config.load_limit).await {
            Ok(rows) => {
                let mut session = state.session.lock().await;
                session.load_resumes(rows.into_iter().map(NewResume::from_summary));
            }
            Err(e) => warn!("Skipping resume preload: {e}"),
        }
    }
}
