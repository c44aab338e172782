// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workouts and the exercises and sets they own.

use super::text_enum;
use crate::time_utils::MmSs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

text_enum! {
    /// Subjective effort for a single set.
    pub enum Effort as "effort" {
        Easy => "EASY",
        Challenging => "CHALLENGING",
        Maximum => "MAXIMUM",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub notes: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Ordered by `position`
    pub exercises: Vec<WorkoutExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub workout_id: String,
    pub exercise_id: String,
    /// Ordered by `position`
    pub sets: Vec<WorkoutSet>,
    pub position: u32,
    pub rest_after: Option<MmSs>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One performed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,
    pub workout_exercise_id: String,
    pub reps: u32,
    /// Kilograms
    pub weight: Option<f64>,
    pub duration: Option<MmSs>,
    /// Planned rest after this set
    pub rest: Option<MmSs>,
    /// Rest actually taken
    pub rest_taken: Option<MmSs>,
    pub notes: String,
    pub is_personal_record: bool,
    pub effort: Effort,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A workout to create, with its full exercise tree.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub notes: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<NewWorkoutExercise>,
}

/// Child exercise; its position is its index in the parent list.
#[derive(Debug, Clone)]
pub struct NewWorkoutExercise {
    pub exercise_id: String,
    pub rest_after: Option<MmSs>,
    pub notes: Option<String>,
    pub sets: Vec<NewWorkoutSet>,
}

#[derive(Debug, Clone)]
pub struct NewWorkoutSet {
    pub reps: u32,
    pub weight: Option<f64>,
    pub duration: Option<MmSs>,
    pub rest: Option<MmSs>,
    pub rest_taken: Option<MmSs>,
    pub notes: String,
    pub is_personal_record: bool,
    pub effort: Effort,
}

/// Workout update.
///
/// Supplying `exercises` deletes every existing child exercise and set of the
/// workout and recreates them from the list; child ids are not preserved.
#[derive(Debug, Clone, Default)]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub notes: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub exercises: Option<Vec<NewWorkoutExercise>>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    pub user_id: Option<String>,
    /// Inclusive lower bound on start time
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on start time
    pub to: Option<DateTime<Utc>>,
}

impl Workout {
    /// Total sets across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|we| we.sets.len()).sum()
    }
}
