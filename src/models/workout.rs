// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout record model for storage and display.
//!
//! A [`Workout`] is built exactly once from validated input, at which point its
//! derived metric (pace or speed) and label are fixed. Deserializing a workout
//! restores the stored values verbatim and never recomputes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::new_workout::{ValidatedWorkout, ValidationError};
use crate::time_utils::month_name;

/// A (latitude, longitude) pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

impl From<Coords> for geo::Point<f64> {
    fn from(coords: Coords) -> Self {
        geo::Point::new(coords.lng, coords.lat)
    }
}

/// Workout discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Canonical lowercase name, as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Name with the first letter capitalized ("Running").
    pub fn display_name(self) -> String {
        capitalize(self.as_str())
    }

    /// Name of the variant-specific input field.
    pub fn metric_name(self) -> &'static str {
        match self {
            WorkoutKind::Running => "cadence",
            WorkoutKind::Cycling => "elevation",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Variant-specific fields, tagged by `type` in the stored form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetail {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters climbed
        #[serde(rename = "elevation")]
        elevation_gain: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

/// A single completed workout. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: String,
    #[serde(rename = "date")]
    created_at: DateTime<Utc>,
    coords: Coords,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    #[serde(rename = "description")]
    label: String,
    #[serde(flatten)]
    detail: WorkoutDetail,
}

impl Workout {
    /// Build a workout from validated input, fixing its derived fields.
    pub fn new(id: String, created_at: DateTime<Utc>, input: &ValidatedWorkout) -> Self {
        let (distance, duration, metric) = (input.distance(), input.duration(), input.metric());
        let detail = match input.kind() {
            WorkoutKind::Running => WorkoutDetail::Running {
                cadence: metric,
                pace: running_pace(distance, duration),
            },
            WorkoutKind::Cycling => WorkoutDetail::Cycling {
                elevation_gain: metric,
                speed: cycling_speed(distance, duration),
            },
        };

        Self {
            label: label_for(input.kind(), created_at),
            id,
            created_at,
            coords: input.coords(),
            distance,
            duration,
            detail,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn detail(&self) -> &WorkoutDetail {
        &self.detail
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.detail {
            WorkoutDetail::Running { .. } => WorkoutKind::Running,
            WorkoutDetail::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace for running, speed for cycling.
    pub fn metric(&self) -> f64 {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => pace,
            WorkoutDetail::Cycling { speed, .. } => speed,
        }
    }

    /// Cadence for running, elevation gain for cycling.
    pub fn variant_value(&self) -> f64 {
        match self.detail {
            WorkoutDetail::Running { cadence, .. } => cadence,
            WorkoutDetail::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => Some(pace),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { speed, .. } => Some(speed),
            WorkoutDetail::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { cadence, .. } => Some(cadence),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetail::Running { .. } => None,
        }
    }
}

/// Minutes per kilometer.
pub fn running_pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour, with duration given in minutes.
pub fn cycling_speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// "Running on March"
pub fn label_for(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.display_name(), month_name(created_at))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
