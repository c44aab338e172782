// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout service.
//!
//! Every call is scoped to the signed-in user: a workout owned by someone
//! else is reported exactly like a missing one.

use super::report;
use crate::error::{AppError, FieldError, Result};
use crate::models::workout::{NewWorkout, NewWorkoutExercise, WorkoutFilter, WorkoutPatch};
use crate::models::Workout;
use crate::repositories::{Entity, Repository, RepositoryError, WorkoutRepository};
use chrono::{DateTime, Utc};

pub struct WorkoutService<R = WorkoutRepository> {
    repo: R,
}

/// Field errors for every child naming the missing exercise `id`.
fn missing_exercise(exercises: &[NewWorkoutExercise], id: &str) -> AppError {
    let errors: Vec<FieldError> = exercises
        .iter()
        .enumerate()
        .filter(|(_, e)| e.exercise_id == id)
        .map(|(i, _)| {
            FieldError::new(format!("exercises[{i}].exerciseId"), format!("Exercise not found: {id}"))
        })
        .collect();
    if errors.is_empty() {
        AppError::invalid_field("exercises", format!("Exercise not found: {id}"))
    } else {
        AppError::Validation(errors)
    }
}

fn write_error<'a>(
    action: &'static str,
    exercises: Option<&'a [NewWorkoutExercise]>,
) -> impl FnOnce(RepositoryError) -> AppError + 'a {
    move |err| {
        let missing = match &err {
            RepositoryError::NotFound {
                entity: Entity::Exercise,
                id,
            }
            | RepositoryError::InvalidId {
                entity: Entity::Exercise,
                id,
            } => Some(id.clone()),
            _ => None,
        };
        match (missing, exercises) {
            (Some(id), Some(exercises)) => {
                tracing::warn!(action, exercise_id = %id, "Workout references unknown exercise");
                missing_exercise(exercises, &id)
            }
            _ => report(action)(err),
        }
    }
}

fn check_window(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<()> {
    match end {
        Some(end) if end < start => Err(AppError::invalid_field(
            "endTime",
            "End time must not be before start time",
        )),
        _ => Ok(()),
    }
}

impl<R> WorkoutService<R>
where
    R: Repository<Entity = Workout, Filter = WorkoutFilter, Create = NewWorkout, Update = WorkoutPatch>,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The user's workouts starting within `[from, to]`, newest first.
    pub async fn find_all(
        &self,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Workout>> {
        tracing::info!(user_id, ?from, ?to, "Listing workouts");
        let filter = WorkoutFilter {
            user_id: Some(user_id.to_string()),
            from,
            to,
        };
        self.repo
            .find_all(&filter)
            .await
            .map_err(report("workout.find_all"))
    }

    pub async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Workout> {
        tracing::info!(user_id, id, "Finding workout");
        let workout = self
            .repo
            .find_by_id(id)
            .await
            .map_err(report("workout.find_by_id"))?;

        if workout.user_id != user_id {
            tracing::warn!(user_id, id, "Workout belongs to another user");
            return Err(AppError::Repository(RepositoryError::NotFound {
                entity: Entity::Workout,
                id: id.to_string(),
            }));
        }
        Ok(workout)
    }

    pub async fn create(&self, data: NewWorkout) -> Result<Workout> {
        tracing::info!(
            user_id = %data.user_id,
            exercises = data.exercises.len(),
            "Creating workout"
        );
        check_window(data.start_time, data.end_time)?;

        let exercises = data.exercises.clone();
        self.repo
            .create(data)
            .await
            .map_err(write_error("workout.create", Some(exercises.as_slice())))
    }

    pub async fn update(&self, user_id: &str, id: &str, data: WorkoutPatch) -> Result<Workout> {
        let current = self.find_by_id(user_id, id).await?;
        tracing::info!(
            user_id,
            id,
            replaces_exercises = data.exercises.is_some(),
            "Updating workout"
        );

        let start = data.start_time.unwrap_or(current.start_time);
        let end = data.end_time.unwrap_or(current.end_time);
        check_window(start, end)?;

        let exercises = data.exercises.clone();
        self.repo
            .update(id, data)
            .await
            .map_err(write_error("workout.update", exercises.as_deref()))
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        self.find_by_id(user_id, id).await?;
        tracing::info!(user_id, id, "Deleting workout");
        self.repo.delete(id).await.map_err(report("workout.delete"))
    }
}
