// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Repositories: typed persistence per entity.
//!
//! Each repository maps between the relational rows and the domain model in
//! [`crate::models`] and reports failures as [`RepositoryError`]. The shared
//! behavior (id validation, error wrapping, logging) lives in the small
//! helpers below rather than in a base type.

pub mod equipment;
pub mod error;
pub mod exercise;
pub mod muscle_group;
pub mod personal_record;
pub mod user;
pub mod workout;

pub use equipment::EquipmentRepository;
pub use error::{Entity, Operation, RepositoryError};
pub use exercise::ExerciseRepository;
pub use muscle_group::MuscleGroupRepository;
pub use personal_record::PersonalRecordRepository;
pub use user::UserRepository;
pub use workout::WorkoutRepository;

use crate::time_utils::parse_storage_timestamp;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use sqlx::Row;
use std::str::FromStr;

/// The persistence capability every entity repository offers.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send;
    type Filter: Send + Sync;
    type Create: Send;
    type Update: Send;

    /// Fails with `NotFound` when absent, never returns a default.
    async fn find_by_id(&self, id: &str) -> Result<Self::Entity, RepositoryError>;

    /// All matching entities in the repository's natural order.
    async fn find_all(&self, filter: &Self::Filter) -> Result<Vec<Self::Entity>, RepositoryError>;

    async fn create(&self, data: Self::Create) -> Result<Self::Entity, RepositoryError>;

    /// Fails with `NotFound` when `id` is absent.
    async fn update(&self, id: &str, data: Self::Update) -> Result<Self::Entity, RepositoryError>;

    /// Fails with `NotFound` when `id` is absent.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Reject ids that cannot name a row before any storage call.
pub(crate) fn validate_id(entity: Entity, id: &str) -> Result<(), RepositoryError> {
    if id.is_empty() || uuid::Uuid::parse_str(id).is_err() {
        tracing::warn!(entity = entity.name(), id, "Invalid id");
        return Err(RepositoryError::InvalidId {
            entity,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Wrap a storage failure, logging it with its context.
pub(crate) fn storage_error(
    entity: Entity,
    operation: Operation,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |source| {
        tracing::error!(
            entity = entity.name(),
            operation = operation.name(),
            error = %source,
            "Repository operation failed"
        );
        RepositoryError::Persistence {
            entity,
            operation,
            source,
        }
    }
}

pub(crate) fn not_found(entity: Entity, id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity,
        id: id.to_string(),
    }
}

/// Check that every id names an existing `referenced` row.
///
/// Missing rows are reported as `NotFound` for the referenced entity so the
/// caller can tell a bad reference from its own entity being absent.
pub(crate) async fn ensure_referenced(
    conn: &mut SqliteConnection,
    referenced: Entity,
    ids: &[String],
    context: (Entity, Operation),
) -> Result<(), RepositoryError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", referenced.table());
    for id in ids {
        validate_id(referenced, id)?;
        let found = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(storage_error(context.0, context.1))?;
        if found.is_none() {
            return Err(not_found(referenced, id));
        }
    }
    Ok(())
}

/// Whether a storage error is a foreign key constraint failure.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Drop repeated values, keeping the first occurrence of each.
pub(crate) fn dedup_in_order<T: PartialEq + Clone>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

pub(crate) fn log_operation(entity: Entity, operation: Operation, id: Option<&str>) {
    tracing::debug!(entity = entity.name(), operation = operation.name(), id, "Repository call");
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time at storage precision, so returned entities equal re-read ones.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `LIKE` pattern matching `needle` anywhere; use with `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn decode_error(column: &str, reason: impl std::fmt::Display) -> sqlx::Error {
    sqlx::Error::Decode(format!("column {column}: {reason}").into())
}

pub(crate) fn get_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_storage_timestamp(&raw).map_err(|e| decode_error(column, e))
}

pub(crate) fn get_optional_timestamp(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|r| parse_storage_timestamp(&r).map_err(|e| decode_error(column, e)))
        .transpose()
}

/// Read a text column holding one of an enum's tags.
pub(crate) fn get_tag<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e| decode_error(column, e))
}

/// Read a non-negative integer column.
pub(crate) fn get_u32(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(|e| decode_error(column, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(Entity::Workout, &new_id()).is_ok());

        for bad in ["", "abc", "123", "not-a-uuid-at-all-0000000000000000"] {
            let err = validate_id(Entity::Workout, bad).unwrap_err();
            assert!(matches!(err, RepositoryError::InvalidId { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_dedup_in_order() {
        assert_eq!(dedup_in_order(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("squat"), "%squat%");
        assert_eq!(contains_pattern("50%_x\\"), "%50\\%\\_x\\\\%");
    }
}
