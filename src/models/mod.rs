// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod new_workout;
pub mod workout;

pub use new_workout::{NewWorkout, ValidatedWorkout, ValidationError};
pub use workout::{Coords, Workout, WorkoutDetail, WorkoutKind};
