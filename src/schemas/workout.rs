// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout bodies: the workout with its full exercise and set tree.

use super::double_option;
use crate::models::workout::{NewWorkout, NewWorkoutExercise, NewWorkoutSet, WorkoutPatch};
use crate::models::Effort;
use crate::time_utils::MmSs;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<WorkoutExerciseInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseInput {
    #[validate(length(min = 1, message = "Exercise is required"))]
    pub exercise_id: String,
    pub rest_after: Option<MmSs>,
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub sets: Vec<SetInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetInput {
    pub reps: u32,
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,
    pub duration: Option<MmSs>,
    pub rest: Option<MmSs>,
    pub rest_taken: Option<MmSs>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_personal_record: bool,
    pub effort: Effort,
}

/// `PUT /api/workouts/{id}` body. Supplying `exercises` replaces the whole tree.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutUpdateInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub notes: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[validate(nested)]
    pub exercises: Option<Vec<WorkoutExerciseInput>>,
}

impl From<SetInput> for NewWorkoutSet {
    fn from(input: SetInput) -> Self {
        NewWorkoutSet {
            reps: input.reps,
            weight: input.weight,
            duration: input.duration,
            rest: input.rest,
            rest_taken: input.rest_taken,
            notes: input.notes,
            is_personal_record: input.is_personal_record,
            effort: input.effort,
        }
    }
}

impl From<WorkoutExerciseInput> for NewWorkoutExercise {
    fn from(input: WorkoutExerciseInput) -> Self {
        NewWorkoutExercise {
            exercise_id: input.exercise_id,
            rest_after: input.rest_after,
            notes: input.notes,
            sets: input.sets.into_iter().map(Into::into).collect(),
        }
    }
}

impl WorkoutInput {
    pub fn into_new(self, user_id: String) -> NewWorkout {
        NewWorkout {
            user_id,
            name: self.name,
            description: self.description,
            notes: self.notes,
            start_time: self.start_time,
            end_time: self.end_time,
            exercises: self.exercises.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<WorkoutUpdateInput> for WorkoutPatch {
    fn from(input: WorkoutUpdateInput) -> Self {
        WorkoutPatch {
            name: input.name,
            description: input.description,
            notes: input.notes,
            start_time: input.start_time,
            end_time: input.end_time,
            exercises: input
                .exercises
                .map(|list| list.into_iter().map(Into::into).collect()),
        }
    }
}
