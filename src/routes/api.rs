// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes.

use crate::error::{AppError, Result};
use crate::models::{Coords, NewWorkout, ValidationError, Workout, WorkoutKind};
use crate::services::render::{self, MapView, Popup};
use crate::AppState;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Workout routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts).post(create_workout).delete(reset_workouts),
        )
        .route("/api/workouts/form", post(create_workout_form))
        .route("/api/workouts/{id}", get(get_workout))
        .route("/api/workouts/{id}/view", get(get_workout_view))
        .route("/api/workouts/{id}/popup", get(get_workout_popup))
        .route("/api/render/workouts", get(render_workouts))
        .route("/api/markers", get(get_markers))
}

// ─── Creation ────────────────────────────────────────────────

/// JSON body for creating a workout.
///
/// `cadence` is read for running and `elevation` for cycling; the other is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub coords: Coords,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub cadence: Option<f64>,
    pub elevation: Option<f64>,
}

impl CreateWorkoutRequest {
    pub fn into_new_workout(self) -> std::result::Result<NewWorkout, ValidationError> {
        let kind: WorkoutKind = self.kind.parse()?;
        let metric = match kind {
            WorkoutKind::Running => self.cadence,
            WorkoutKind::Cycling => self.elevation,
        };
        Ok(NewWorkout {
            kind,
            coords: self.coords,
            distance: self.distance,
            duration: self.duration,
            metric,
        })
    }
}

/// Raw form fields, exactly as typed by the user.
#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

impl WorkoutForm {
    pub fn into_new_workout(self) -> std::result::Result<NewWorkout, ValidationError> {
        let kind: WorkoutKind = self.kind.parse()?;
        let metric = match kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        };
        NewWorkout::from_form(
            kind.as_str(),
            Coords::new(self.lat, self.lng),
            &self.distance,
            &self.duration,
            metric,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CreateWorkoutResponse {
    pub workout: Workout,
    /// Whether the snapshot write after the append succeeded.
    pub persisted: bool,
}

// Body rejections are taken as values so malformed input gets the same
// JSON error body as a failed validation.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    let Json(request) = payload?;
    create(&state, request.into_new_workout()?).await
}

async fn create_workout_form(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Form<WorkoutForm>, FormRejection>,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    let Form(form) = payload?;
    create(&state, form.into_new_workout()?).await
}

async fn create(
    state: &AppState,
    input: NewWorkout,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    let created = state.store.lock().await.create_workout(&input)?;
    let persisted = created.persisted();

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkoutResponse {
            workout: created.workout,
            persisted,
        }),
    ))
}

// ─── Reads ───────────────────────────────────────────────────

/// All workouts in insertion order.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<Workout>> {
    let store = state.store.lock().await;
    tracing::debug!(count = store.len(), "Listing workouts");
    Json(store.workouts().to_vec())
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    let store = state.store.lock().await;
    let workout = store.find_by_id(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(workout.clone()))
}

/// Map target for centering on a workout from the list.
async fn get_workout_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MapView>> {
    let store = state.store.lock().await;
    let workout = store.find_by_id(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(render::map_view(workout, state.config.map_zoom_level)))
}

async fn get_workout_popup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Popup>> {
    let store = state.store.lock().await;
    let workout = store.find_by_id(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(render::popup(workout)))
}

/// List entries as an HTML fragment.
async fn render_workouts(State(state): State<Arc<AppState>>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render::workout_list_html(store.workouts()))
}

async fn get_markers(State(state): State<Arc<AppState>>) -> Json<geojson::FeatureCollection> {
    let store = state.store.lock().await;
    Json(render::markers(store.workouts()))
}

fn not_found(id: &str) -> AppError {
    tracing::debug!(workout_id = id, "Workout not found");
    AppError::NotFound(format!("Workout {} not found", id))
}

// ─── Reset ───────────────────────────────────────────────────

/// Discard every workout and the stored snapshot.
async fn reset_workouts(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.store.lock().await.reset()?;
    Ok(StatusCode::NO_CONTENT)
}
