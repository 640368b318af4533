// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Inbound workout request and its validation.

use crate::models::workout::{cycling_speed, running_pace, Coords, WorkoutKind};

/// Raw request to create a workout, as gathered by the presentation layer.
///
/// `metric` is cadence for running and elevation gain for cycling. A `None`
/// field means the user left it blank.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub coords: Coords,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub metric: Option<f64>,
}

/// A request whose numeric fields are all finite and strictly positive.
///
/// Only [`NewWorkout::validate`] produces one, so every constructed workout
/// starts from checked input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedWorkout {
    kind: WorkoutKind,
    coords: Coords,
    distance: f64,
    duration: f64,
    metric: f64,
}

impl ValidatedWorkout {
    pub fn kind(&self) -> WorkoutKind {
        self.kind
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

    pub fn metric(&self) -> f64 {
        self.metric
    }
}

impl NewWorkout {
    pub fn new(kind: WorkoutKind, coords: Coords, distance: f64, duration: f64, metric: f64) -> Self {
        Self {
            kind,
            coords,
            distance: Some(distance),
            duration: Some(duration),
            metric: Some(metric),
        }
    }

    /// Build a request from raw form text.
    ///
    /// Blank fields are missing; text that does not parse as a number becomes
    /// NaN and is rejected by [`validate`](Self::validate).
    pub fn from_form(
        kind: &str,
        coords: Coords,
        distance: &str,
        duration: &str,
        metric: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            kind: kind.parse()?,
            coords,
            distance: parse_form_number(distance),
            duration: parse_form_number(duration),
            metric: parse_form_number(metric),
        })
    }

    /// Check distance, duration and metric, in that order, then the
    /// coordinates and the derived pace or speed.
    ///
    /// Every value that ends up in the snapshot must be finite, since
    /// non-finite numbers do not survive the JSON encoding.
    pub fn validate(&self) -> Result<ValidatedWorkout, ValidationError> {
        let distance = positive("distance", self.distance)?;
        let duration = positive("duration", self.duration)?;
        let metric = positive(self.kind.metric_name(), self.metric)?;

        if !(self.coords.lat.is_finite() && self.coords.lng.is_finite()) {
            return Err(ValidationError::NotFinite { field: "coords" });
        }

        let (derived_field, derived) = match self.kind {
            WorkoutKind::Running => ("pace", running_pace(distance, duration)),
            WorkoutKind::Cycling => ("speed", cycling_speed(distance, duration)),
        };
        if !derived.is_finite() {
            return Err(ValidationError::NotFinite { field: derived_field });
        }

        Ok(ValidatedWorkout {
            kind: self.kind,
            coords: self.coords,
            distance,
            duration,
            metric,
        })
    }
}

fn parse_form_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse().unwrap_or(f64::NAN))
}

fn positive(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

/// Rejected workout input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Unknown workout type: {0}")]
    UnknownKind(String),
}
