// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end session behavior: create, snapshot, restart, reset.

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use workout_tracker::db::{keys, FileStorage, KeyValueStorage, MemoryStorage};
use workout_tracker::models::{Coords, NewWorkout, WorkoutKind};
use workout_tracker::services::WorkoutStore;
use workout_tracker::time_utils::month_name;

fn running() -> NewWorkout {
    NewWorkout::new(WorkoutKind::Running, Coords::new(10.0, 10.0), 5.0, 25.0, 180.0)
}

fn cycling() -> NewWorkout {
    NewWorkout::new(WorkoutKind::Cycling, Coords::new(20.0, 20.0), 15.0, 45.0, 200.0)
}

#[test]
fn test_run_and_ride_survive_restart() {
    let storage = MemoryStorage::new();
    let mut store = WorkoutStore::new(Arc::new(storage.clone()));

    let run = store.create_workout(&running()).unwrap().workout;
    let ride = store.create_workout(&cycling()).unwrap().workout;

    assert_eq!(run.pace(), Some(5.0));
    assert_eq!(
        run.label(),
        format!("Running on {}", month_name(run.created_at()))
    );
    assert_eq!(ride.speed(), Some(20.0));

    store.snapshot().unwrap();

    let restored = WorkoutStore::open(Arc::new(storage));
    assert_eq!(restored.workouts(), [run, ride]);
}

#[test]
fn test_label_month_follows_clock() {
    let mut store = WorkoutStore::new(Arc::new(MemoryStorage::new()))
        .with_clock(|| Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());

    let workout = store.create_workout(&cycling()).unwrap().workout;
    assert!(workout.label().contains("March"));
    assert_eq!(workout.label(), "Cycling on March");
}

#[test]
fn test_ids_from_reset_session_are_not_found() {
    let storage = MemoryStorage::new();
    let mut store = WorkoutStore::new(Arc::new(storage.clone()));
    let old_id = store.create_workout(&running()).unwrap().workout.id().to_string();

    store.reset().unwrap();

    let restored = WorkoutStore::open(Arc::new(storage));
    assert!(restored.is_empty());
    assert!(restored.find_by_id(&old_id).is_none());
}

#[test]
fn test_reads_snapshot_written_by_browser_app() {
    // Shape produced by JSON.stringify on the browser app's workout objects
    let storage = MemoryStorage::new();
    storage
        .set(
            keys::WORKOUTS,
            r#"[
                {"date":"2024-05-20T08:15:30.123Z","id":"6193330123","coords":[52.37,4.89],
                 "distance":5,"duration":25,"type":"running","cadence":180,"pace":5,
                 "description":"Running on May"},
                {"date":"2024-05-21T17:00:00.000Z","id":"6310800000","coords":[52.38,4.9],
                 "distance":20,"duration":60,"type":"cycling","elevation":150,
                 "speed":0.005555555555555556,"description":"Cycling on May"}
            ]"#,
        )
        .unwrap();

    let store = WorkoutStore::open(Arc::new(storage));

    assert_eq!(store.len(), 2);
    let ride = store.find_by_id("6310800000").unwrap();
    assert_eq!(ride.kind(), WorkoutKind::Cycling);
    assert_eq!(ride.elevation_gain(), Some(150.0));
    // Stored speed is kept even though it was computed differently
    assert_eq!(ride.speed(), Some(0.005555555555555556));
}

#[test]
fn test_file_storage_session() {
    let dir = std::env::temp_dir().join(format!(
        "workout-tracker-session-{}-{}",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));

    let mut store = WorkoutStore::new(Arc::new(FileStorage::open(&dir).unwrap()));
    let created = store.create_workout(&running()).unwrap();
    assert!(created.persisted());

    let restored = WorkoutStore::open(Arc::new(FileStorage::open(&dir).unwrap()));
    assert_eq!(restored.workouts(), store.workouts());

    std::fs::remove_dir_all(dir).unwrap();
}
