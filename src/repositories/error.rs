// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed repository failures.

/// Entities with a repository, used to label errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    MuscleGroup,
    Equipment,
    Exercise,
    Workout,
    /// A set inside a workout; only ever referenced, never stored on its own.
    Set,
    PersonalRecord,
}

impl Entity {
    /// Human readable name used in messages and log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Entity::User => "User",
            Entity::MuscleGroup => "Muscle group",
            Entity::Equipment => "Equipment",
            Entity::Exercise => "Exercise",
            Entity::Workout => "Workout",
            Entity::Set => "Set",
            Entity::PersonalRecord => "Personal record",
        }
    }

    pub(crate) const fn table(self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::MuscleGroup => "muscle_groups",
            Entity::Equipment => "equipment",
            Entity::Exercise => "exercises",
            Entity::Workout => "workouts",
            Entity::Set => "sets",
            Entity::PersonalRecord => "personal_records",
        }
    }

    /// Prefix for machine-readable error codes.
    pub const fn code(self) -> &'static str {
        match self {
            Entity::User => "USER",
            Entity::MuscleGroup => "MUSCLE_GROUP",
            Entity::Equipment => "EQUIPMENT",
            Entity::Exercise => "EXERCISE",
            Entity::Workout => "WORKOUT",
            Entity::Set => "SET",
            Entity::PersonalRecord => "PERSONAL_RECORD",
        }
    }
}

/// Repository operation, for error codes and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindById,
    FindAll,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Operation::FindById => "findById",
            Operation::FindAll => "findAll",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    const fn code(self) -> &'static str {
        match self {
            Operation::FindById => "FIND_BY_ID",
            Operation::FindAll => "FIND_ALL",
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Rejected before touching storage: empty or not a UUID.
    #[error("Invalid ID provided: {id:?}")]
    InvalidId { entity: Entity, id: String },

    #[error("{} not found: {id}", entity.name())]
    NotFound { entity: Entity, id: String },

    /// Still referenced by rows that must not be removed with it.
    #[error("{} is in use: {id}", entity.name())]
    InUse { entity: Entity, id: String },

    /// Anything the storage layer raised, with the original error kept.
    #[error("Failed to {} {}: {source}", operation.name(), entity.name().to_lowercase())]
    Persistence {
        entity: Entity,
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    /// Machine-readable code such as `MUSCLE_GROUP_NOT_FOUND`.
    pub fn code(&self) -> String {
        match self {
            RepositoryError::InvalidId { entity, .. } => format!("{}_INVALID_ID", entity.code()),
            RepositoryError::NotFound { entity, .. } => format!("{}_NOT_FOUND", entity.code()),
            RepositoryError::InUse { entity, .. } => format!("{}_IN_USE", entity.code()),
            RepositoryError::Persistence {
                entity, operation, ..
            } => format!("{}_{}_ERROR", entity.code(), operation.code()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}
