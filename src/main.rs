// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Serves the exercise catalogue and the per-user workout log over JSON.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::{Config, LogFormat},
    db::Database,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first: it decides how we log
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(&config)?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to open database")?;

    let state = Arc::new(AppState::new(config.clone(), db));

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging: JSON for collectors, or pretty output for development.
///
/// `RUST_LOG` wins over `LOG_LEVEL` when both are set.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid LOG_LEVEL {:?}", config.log_level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_ansi(true))
            .init(),
    }
    Ok(())
}
