// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal record persistence.

use super::{
    ensure_referenced, get_tag, get_timestamp, log_operation, new_id, not_found, now,
    storage_error, validate_id, Entity, Operation, Repository, RepositoryError,
};
use crate::db::Database;
use crate::models::personal_record::{
    NewPersonalRecord, PersonalRecordFilter, PersonalRecordPatch,
};
use crate::models::PersonalRecord;
use crate::time_utils::format_storage_timestamp;
use async_trait::async_trait;
use chrono::SubsecRound;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

const ENTITY: Entity = Entity::PersonalRecord;

const COLUMNS: &str =
    "id, exercise_id, workout_id, set_id, kind, value, achieved_at, created_at, updated_at";

#[derive(Clone)]
pub struct PersonalRecordRepository {
    db: Database,
}

fn row_to_record(row: &SqliteRow) -> Result<PersonalRecord, sqlx::Error> {
    Ok(PersonalRecord {
        id: row.try_get("id")?,
        exercise_id: row.try_get("exercise_id")?,
        workout_id: row.try_get("workout_id")?,
        set_id: row.try_get("set_id")?,
        kind: get_tag(row, "kind")?,
        value: row.try_get("value")?,
        achieved_at: get_timestamp(row, "achieved_at")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

impl PersonalRecordRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for PersonalRecordRepository {
    type Entity = PersonalRecord;
    type Filter = PersonalRecordFilter;
    type Create = NewPersonalRecord;
    type Update = PersonalRecordPatch;

    async fn find_by_id(&self, id: &str) -> Result<PersonalRecord, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM personal_records WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))?
            .ok_or_else(|| not_found(ENTITY, id))?;

        row_to_record(&row).map_err(storage_error(ENTITY, Operation::FindById))
    }

    async fn find_all(
        &self,
        filter: &PersonalRecordFilter,
    ) -> Result<Vec<PersonalRecord>, RepositoryError> {
        log_operation(ENTITY, Operation::FindAll, None);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM personal_records WHERE 1 = 1"));
        if let Some(user_id) = &filter.user_id {
            query
                .push(" AND workout_id IN (SELECT id FROM workouts WHERE user_id = ")
                .push_bind(user_id.clone())
                .push(")");
        }
        if let Some(exercise_id) = &filter.exercise_id {
            query.push(" AND exercise_id = ").push_bind(exercise_id.clone());
        }
        if let Some(workout_id) = &filter.workout_id {
            query.push(" AND workout_id = ").push_bind(workout_id.clone());
        }
        if let Some(set_id) = &filter.set_id {
            query.push(" AND set_id = ").push_bind(set_id.clone());
        }
        if let Some(kind) = filter.kind {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        query.push(" ORDER BY achieved_at DESC, rowid DESC");

        let rows = query
            .build()
            .fetch_all(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindAll))?;

        rows.iter()
            .map(row_to_record)
            .collect::<Result<_, _>>()
            .map_err(storage_error(ENTITY, Operation::FindAll))
    }

    async fn create(&self, data: NewPersonalRecord) -> Result<PersonalRecord, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);
        let fail = || storage_error(ENTITY, Operation::Create);
        let context = (ENTITY, Operation::Create);

        let id = new_id();
        let now = now();
        let stamp = format_storage_timestamp(now);
        let achieved_at = data.achieved_at.trunc_subsecs(6);

        let mut tx = self.db.pool().begin().await.map_err(fail())?;

        ensure_referenced(&mut tx, Entity::Exercise, &[data.exercise_id.clone()], context).await?;
        ensure_referenced(&mut tx, Entity::Workout, &[data.workout_id.clone()], context).await?;
        if let Some(set_id) = &data.set_id {
            ensure_referenced(&mut tx, Entity::Set, &[set_id.clone()], context).await?;
        }

        sqlx::query(
            r"
            INSERT INTO personal_records (id, exercise_id, workout_id, set_id, kind, value,
                                          achieved_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.exercise_id)
        .bind(&data.workout_id)
        .bind(&data.set_id)
        .bind(data.kind.as_str())
        .bind(data.value)
        .bind(format_storage_timestamp(achieved_at))
        .bind(&stamp)
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(fail())?;

        tx.commit().await.map_err(fail())?;

        Ok(PersonalRecord {
            id,
            exercise_id: data.exercise_id,
            workout_id: data.workout_id,
            set_id: data.set_id,
            kind: data.kind,
            value: data.value,
            achieved_at,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        id: &str,
        data: PersonalRecordPatch,
    ) -> Result<PersonalRecord, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Update, Some(id));

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE personal_records SET ");
        let mut fields = query.separated(", ");
        if let Some(kind) = data.kind {
            fields.push("kind = ").push_bind_unseparated(kind.as_str());
        }
        if let Some(value) = data.value {
            fields.push("value = ").push_bind_unseparated(value);
        }
        if let Some(achieved_at) = data.achieved_at {
            fields
                .push("achieved_at = ")
                .push_bind_unseparated(format_storage_timestamp(achieved_at));
        }
        fields
            .push("updated_at = ")
            .push_bind_unseparated(format_storage_timestamp(now()));
        query.push(" WHERE id = ").push_bind(id);

        let result = query
            .build()
            .execute(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::Update))?;
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Delete, Some(id));

        let result = sqlx::query("DELETE FROM personal_records WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::Delete))?;
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }
        Ok(())
    }
}
