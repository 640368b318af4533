// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod render;
pub mod workout_store;

pub use render::{MapView, Popup};
pub use workout_store::{Created, WorkoutStore};
