// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Tracker API Server
//!
//! Serves the workout API to the map frontend and keeps the workout
//! snapshot on local disk.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::FileStorage,
    services::WorkoutStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Workout-Tracker API");

    // Open snapshot storage and restore the previous session
    let storage = FileStorage::open(&config.data_dir).context("Failed to open data directory")?;
    let store = WorkoutStore::open(Arc::new(storage));
    tracing::info!(count = store.len(), "Workout session loaded");

    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
