// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: the authoritative, append-only workout collection.
//!
//! Handles the core workflow:
//! 1. Validate the inbound request
//! 2. Build the workout with its derived fields
//! 3. Append it to the in-memory collection
//! 4. Write the full collection as a snapshot
//!
//! On startup the collection is restored from the snapshot as plain data.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::{keys, KeyValueStorage, StorageError};
use crate::models::{NewWorkout, ValidationError, Workout};
use crate::time_utils::{format_utc_rfc3339, millis_suffix};

/// Ids are ten decimal digits.
const ID_MODULUS: u64 = 10_000_000_000;

/// Source of creation timestamps.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of a successful [`WorkoutStore::create_workout`].
#[derive(Debug)]
pub struct Created {
    pub workout: Workout,
    /// Outcome of the snapshot write that followed the append.
    pub snapshot: Result<(), StorageError>,
}

impl Created {
    pub fn persisted(&self) -> bool {
        self.snapshot.is_ok()
    }
}

pub struct WorkoutStore {
    storage: Arc<dyn KeyValueStorage>,
    workouts: Vec<Workout>,
    clock: Clock,
}

impl WorkoutStore {
    /// Create an empty store over `storage`. Nothing is read yet.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            workouts: Vec::new(),
            clock: Box::new(Utc::now),
        }
    }

    /// Create a store and restore whatever snapshot `storage` holds.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut store = Self::new(storage);
        store.restore();
        store
    }

    /// Replace the timestamp source.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Validate `input`, append the new workout, and write a snapshot.
    ///
    /// A validation failure leaves both the collection and the snapshot
    /// untouched. A snapshot failure is reported in [`Created::snapshot`]; the
    /// workout stays in memory.
    pub fn create_workout(&mut self, input: &NewWorkout) -> Result<Created, ValidationError> {
        let validated = input.validate().inspect_err(|e| {
            tracing::info!(kind = %input.kind, error = %e, "Rejected workout input");
        })?;

        let created_at = (self.clock)();
        let id = self.next_id(created_at);
        let workout = Workout::new(id, created_at, &validated);
        self.workouts.push(workout.clone());

        tracing::info!(
            workout_id = workout.id(),
            kind = %workout.kind(),
            created_at = %format_utc_rfc3339(created_at),
            count = self.workouts.len(),
            "Created workout"
        );

        let snapshot = self.snapshot();
        if let Err(e) = &snapshot {
            tracing::warn!(workout_id = workout.id(), error = %e, "Failed to write snapshot");
        }

        Ok(Created { workout, snapshot })
    }

    /// Write the full collection to storage, replacing any previous snapshot.
    pub fn snapshot(&self) -> Result<(), StorageError> {
        let encoded = encode_snapshot(&self.workouts)?;
        self.storage.set(keys::WORKOUTS, &encoded)?;
        tracing::debug!(count = self.workouts.len(), bytes = encoded.len(), "Wrote snapshot");
        Ok(())
    }

    /// Replace the in-memory collection with the stored snapshot.
    ///
    /// Records are restored verbatim; derived fields are not recomputed. A
    /// missing snapshot yields an empty collection, as does an unreadable or
    /// corrupt one (logged). Returns the number of workouts restored.
    pub fn restore(&mut self) -> usize {
        self.workouts = match self.load_snapshot() {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(error = %e, "Could not restore snapshot, starting empty");
                Vec::new()
            }
        };
        tracing::info!(count = self.workouts.len(), "Restored workouts");
        self.workouts.len()
    }

    fn load_snapshot(&self) -> Result<Vec<Workout>, StorageError> {
        match self.storage.get(keys::WORKOUTS)? {
            Some(encoded) => decode_snapshot(&encoded),
            None => Ok(Vec::new()),
        }
    }

    /// Discard the collection and delete the stored snapshot.
    ///
    /// The stored snapshot is removed first; if that fails the in-memory
    /// collection is left as it was.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.storage.remove(keys::WORKOUTS)?;
        let discarded = self.workouts.len();
        self.workouts.clear();
        tracing::info!(discarded, "Reset workout session");
        Ok(())
    }

    /// Linear lookup by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// All workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Id derived from the creation time, bumped past any id already in use.
    fn next_id(&self, created_at: DateTime<Utc>) -> String {
        let mut candidate = millis_suffix(created_at);
        loop {
            let id = format!("{candidate:010}");
            if self.find_by_id(&id).is_none() {
                return id;
            }
            candidate = (candidate + 1) % ID_MODULUS;
        }
    }
}

/// Encode workouts in the stored snapshot format (a JSON array).
pub fn encode_snapshot(workouts: &[Workout]) -> Result<String, StorageError> {
    serde_json::to_string(workouts).map_err(|e| StorageError::Corrupt(e.to_string()))
}

/// Decode a stored snapshot into plain workout records.
pub fn decode_snapshot(encoded: &str) -> Result<Vec<Workout>, StorageError> {
    serde_json::from_str(encoded).map_err(|e| StorageError::Corrupt(e.to_string()))
}
