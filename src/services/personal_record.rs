// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal record service.
//!
//! Records hang off a workout, so ownership is checked through the workout
//! repository.

use super::report;
use crate::error::{AppError, Result};
use crate::models::personal_record::{
    NewPersonalRecord, PersonalRecordFilter, PersonalRecordPatch,
};
use crate::models::workout::{NewWorkout, WorkoutFilter, WorkoutPatch};
use crate::models::{PersonalRecord, Workout};
use crate::repositories::{
    Entity, PersonalRecordRepository, Repository, RepositoryError, WorkoutRepository,
};

pub struct PersonalRecordService<R = PersonalRecordRepository, W = WorkoutRepository> {
    repo: R,
    workouts: W,
}

impl<R, W> PersonalRecordService<R, W>
where
    R: Repository<
        Entity = PersonalRecord,
        Filter = PersonalRecordFilter,
        Create = NewPersonalRecord,
        Update = PersonalRecordPatch,
    >,
    W: Repository<Entity = Workout, Filter = WorkoutFilter, Create = NewWorkout, Update = WorkoutPatch>,
{
    pub fn new(repo: R, workouts: W) -> Self {
        Self { repo, workouts }
    }

    /// The workout, if it exists and belongs to `user_id`.
    async fn owned_workout(&self, user_id: &str, workout_id: &str) -> Result<Option<Workout>> {
        match self.workouts.find_by_id(workout_id).await {
            Ok(workout) if workout.user_id == user_id => Ok(Some(workout)),
            Ok(_) => Ok(None),
            Err(RepositoryError::NotFound { .. } | RepositoryError::InvalidId { .. }) => Ok(None),
            Err(err) => Err(report("personal_record.owned_workout")(err)),
        }
    }

    /// Records from the user's own workouts, most recent first.
    pub async fn find_all(
        &self,
        user_id: &str,
        mut filter: PersonalRecordFilter,
    ) -> Result<Vec<PersonalRecord>> {
        filter.user_id = Some(user_id.to_string());
        tracing::info!(
            user_id,
            exercise_id = ?filter.exercise_id,
            kind = ?filter.kind,
            "Listing personal records"
        );
        self.repo
            .find_all(&filter)
            .await
            .map_err(report("personal_record.find_all"))
    }

    pub async fn create(&self, user_id: &str, data: NewPersonalRecord) -> Result<PersonalRecord> {
        tracing::info!(user_id, workout_id = %data.workout_id, kind = %data.kind, "Creating personal record");

        let Some(workout) = self.owned_workout(user_id, &data.workout_id).await? else {
            return Err(AppError::invalid_field(
                "workoutId",
                format!("Workout not found: {}", data.workout_id),
            ));
        };
        if let Some(set_id) = &data.set_id {
            let in_workout = workout
                .exercises
                .iter()
                .flat_map(|we| we.sets.iter())
                .any(|set| &set.id == set_id);
            if !in_workout {
                return Err(AppError::invalid_field(
                    "setId",
                    format!("Set not found in workout: {set_id}"),
                ));
            }
        }

        self.repo.create(data).await.map_err(|err| {
            let unknown_exercise = matches!(
                err,
                RepositoryError::NotFound {
                    entity: Entity::Exercise,
                    ..
                } | RepositoryError::InvalidId {
                    entity: Entity::Exercise,
                    ..
                }
            );
            if unknown_exercise {
                AppError::invalid_field("exerciseId", err.to_string())
            } else {
                report("personal_record.create")(err)
            }
        })
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let record = self
            .repo
            .find_by_id(id)
            .await
            .map_err(report("personal_record.find_by_id"))?;
        if self.owned_workout(user_id, &record.workout_id).await?.is_none() {
            tracing::warn!(user_id, id, "Personal record belongs to another user");
            return Err(AppError::Repository(RepositoryError::NotFound {
                entity: Entity::PersonalRecord,
                id: id.to_string(),
            }));
        }

        tracing::info!(user_id, id, "Deleting personal record");
        self.repo
            .delete(id)
            .await
            .map_err(report("personal_record.delete"))
    }
}
