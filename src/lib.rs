// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout tracker: log runs and rides at points on a map
//!
//! This crate holds the workout record model, the session store that
//! validates, persists and restores workouts, and the HTTP API a map
//! frontend uses to create and display them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::WorkoutStore;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The store is locked for the whole of each request that touches it, so an
/// append and its snapshot write are never interleaved with another request.
pub struct AppState {
    pub config: Config,
    pub store: Mutex<WorkoutStore>,
}

impl AppState {
    pub fn new(config: Config, store: WorkoutStore) -> Self {
        Self {
            config,
            store: Mutex::new(store),
        }
    }
}
