// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use workout_tracker::config::Config;
use workout_tracker::db::MemoryStorage;
use workout_tracker::routes::create_router;
use workout_tracker::services::WorkoutStore;
use workout_tracker::AppState;

/// Create a test app over in-memory storage.
/// Returns the router and the storage, so tests can inspect the snapshot.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, MemoryStorage) {
    let storage = MemoryStorage::new();
    (create_test_app_with(storage.clone()), storage)
}

/// Create a test app that restores from an existing storage.
#[allow(dead_code)]
pub fn create_test_app_with(storage: MemoryStorage) -> axum::Router {
    let store = WorkoutStore::open(Arc::new(storage));
    let state = Arc::new(AppState::new(Config::default(), store));
    create_router(state)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
