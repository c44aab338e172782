// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side state for the web UI, kept free of any rendering concerns.

pub mod exercise_list;
pub mod form;

pub use exercise_list::{ExerciseListAction, ExerciseListState, FilterChange, ViewMode};
pub use form::FormState;
