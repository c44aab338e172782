// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise service.
//!
//! Listings hide archived exercises unless asked for them. Unknown muscle
//! group or equipment ids in a write become field errors on the list that
//! named them.

use super::report;
use crate::error::{AppError, Result};
use crate::models::exercise::{ExerciseFilter, ExercisePatch, NewExercise};
use crate::models::Exercise;
use crate::repositories::{Entity, ExerciseRepository, Repository, RepositoryError};

pub struct ExerciseService<R = ExerciseRepository> {
    repo: R,
}

/// Turn a bad relation id into a field error; pass everything else through.
fn reference_error(action: &'static str) -> impl FnOnce(RepositoryError) -> AppError {
    move |err| {
        let field = match &err {
            RepositoryError::NotFound { entity, .. } | RepositoryError::InvalidId { entity, .. } => {
                match entity {
                    Entity::MuscleGroup => Some("muscleGroups"),
                    Entity::Equipment => Some("equipment"),
                    _ => None,
                }
            }
            _ => None,
        };
        match field {
            Some(field) => {
                tracing::warn!(action, field, error = %err, "Unknown reference");
                AppError::invalid_field(field, err.to_string())
            }
            None => report(action)(err),
        }
    }
}

impl<R> ExerciseService<R>
where
    R: Repository<
        Entity = Exercise,
        Filter = ExerciseFilter,
        Create = NewExercise,
        Update = ExercisePatch,
    >,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Exercise> {
        tracing::info!(id, "Finding exercise");
        self.repo
            .find_by_id(id)
            .await
            .map_err(report("exercise.find_by_id"))
    }

    /// List exercises. Without `include_archived` an unset archived flag
    /// means active only.
    pub async fn find_all(
        &self,
        mut filter: ExerciseFilter,
        include_archived: bool,
    ) -> Result<Vec<Exercise>> {
        if !include_archived && filter.is_archived.is_none() {
            filter.is_archived = Some(false);
        }
        tracing::info!(
            exercise_type = ?filter.exercise_type,
            body = ?filter.body,
            archived = ?filter.is_archived,
            "Listing exercises"
        );

        let exercises = self
            .repo
            .find_all(&filter)
            .await
            .map_err(report("exercise.find_all"))?;
        tracing::debug!(count = exercises.len(), "Exercises listed");
        Ok(exercises)
    }

    pub async fn create(&self, data: NewExercise) -> Result<Exercise> {
        tracing::info!(name = %data.name, "Creating exercise");
        let created = self
            .repo
            .create(data)
            .await
            .map_err(reference_error("exercise.create"))?;
        tracing::info!(id = %created.id, "Exercise created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, data: ExercisePatch) -> Result<Exercise> {
        tracing::info!(id, "Updating exercise");
        self.repo
            .update(id, data)
            .await
            .map_err(reference_error("exercise.update"))
    }

    /// Fails with a conflict while logged workouts still use the exercise.
    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!(id, "Deleting exercise");
        self.repo
            .delete(id)
            .await
            .map_err(report("exercise.delete"))
    }
}
