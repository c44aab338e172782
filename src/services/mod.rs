// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - policy layer over the repositories.
//!
//! Each service holds one repository (two for personal records) and is
//! generic over it, defaulting to the SQLite implementation.

pub mod equipment;
pub mod exercise;
pub mod muscle_group;
pub mod personal_record;
pub mod user;
pub mod workout;

pub use equipment::EquipmentService;
pub use exercise::ExerciseService;
pub use muscle_group::MuscleGroupService;
pub use personal_record::PersonalRecordService;
pub use user::UserService;
pub use workout::WorkoutService;

use crate::error::AppError;
use crate::repositories::RepositoryError;

/// Log a failed repository call and lift it to an [`AppError`].
///
/// Caller mistakes (bad or unknown ids) are warnings; storage failures are
/// logged by the repository already and only noted here.
pub(crate) fn report(action: &'static str) -> impl FnOnce(RepositoryError) -> AppError {
    move |err| {
        match &err {
            RepositoryError::Persistence { .. } => {
                tracing::error!(action, code = %err.code(), "Service call failed");
            }
            _ => tracing::warn!(action, code = %err.code(), error = %err, "Service call rejected"),
        }
        AppError::Repository(err)
    }
}
