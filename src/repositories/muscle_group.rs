// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muscle group persistence.

use super::{
    contains_pattern, get_tag, get_timestamp, log_operation, new_id, not_found, now,
    storage_error, validate_id, Entity, Operation, Repository, RepositoryError,
};
use crate::db::Database;
use crate::models::muscle_group::{MuscleGroupFilter, MuscleGroupPatch, NewMuscleGroup};
use crate::models::MuscleGroup;
use crate::time_utils::format_storage_timestamp;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

const ENTITY: Entity = Entity::MuscleGroup;

/// Column list shared with the exercise repository's join queries.
pub(crate) const COLUMNS: &str = "mg.id, mg.name, mg.description, mg.body, mg.created_at, mg.updated_at";

#[derive(Clone)]
pub struct MuscleGroupRepository {
    db: Database,
}

impl MuscleGroupRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub(crate) fn row_to_muscle_group(row: &SqliteRow) -> Result<MuscleGroup, sqlx::Error> {
    Ok(MuscleGroup {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        body: get_tag(row, "body")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

#[async_trait]
impl Repository for MuscleGroupRepository {
    type Entity = MuscleGroup;
    type Filter = MuscleGroupFilter;
    type Create = NewMuscleGroup;
    type Update = MuscleGroupPatch;

    async fn find_by_id(&self, id: &str) -> Result<MuscleGroup, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM muscle_groups mg WHERE mg.id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))?
            .ok_or_else(|| not_found(ENTITY, id))?;

        row_to_muscle_group(&row).map_err(storage_error(ENTITY, Operation::FindById))
    }

    async fn find_all(&self, filter: &MuscleGroupFilter) -> Result<Vec<MuscleGroup>, RepositoryError> {
        log_operation(ENTITY, Operation::FindAll, None);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM muscle_groups mg WHERE 1 = 1"));
        if let Some(name) = &filter.name {
            query
                .push(" AND mg.name LIKE ")
                .push_bind(contains_pattern(name))
                .push(" ESCAPE '\\'");
        }
        if let Some(body) = filter.body {
            query.push(" AND mg.body = ").push_bind(body.as_str());
        }
        query.push(" ORDER BY mg.name COLLATE NOCASE ASC, mg.id ASC");

        let rows = query
            .build()
            .fetch_all(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindAll))?;

        rows.iter()
            .map(row_to_muscle_group)
            .collect::<Result<_, _>>()
            .map_err(storage_error(ENTITY, Operation::FindAll))
    }

    async fn create(&self, data: NewMuscleGroup) -> Result<MuscleGroup, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);

        let id = new_id();
        let now = now();
        let stamp = format_storage_timestamp(now);

        sqlx::query(
            r"
            INSERT INTO muscle_groups (id, name, description, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.body.as_str())
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.pool())
        .await
        .map_err(storage_error(ENTITY, Operation::Create))?;

        Ok(MuscleGroup {
            id,
            name: data.name,
            description: data.description,
            body: data.body,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: &str, data: MuscleGroupPatch) -> Result<MuscleGroup, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Update, Some(id));

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE muscle_groups SET ");
        let mut fields = query.separated(", ");
        if let Some(name) = data.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(description) = data.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(body) = data.body {
            fields.push("body = ").push_bind_unseparated(body.as_str());
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

        let result = sqlx::query("DELETE FROM muscle_groups WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyRegion;

    async fn repo() -> MuscleGroupRepository {
        MuscleGroupRepository::new(Database::in_memory().await.unwrap())
    }

    fn group(name: &str, body: BodyRegion) -> NewMuscleGroup {
        NewMuscleGroup {
            name: name.to_string(),
            description: format!("{name} description"),
            body,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let created = repo.create(group("Quadriceps", BodyRegion::Lower)).await.unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_name_and_filters() {
        let repo = repo().await;
        repo.create(group("Trapezius", BodyRegion::Upper)).await.unwrap();
        repo.create(group("biceps brachii", BodyRegion::Upper)).await.unwrap();
        repo.create(group("Obliques", BodyRegion::Core)).await.unwrap();

        let all = repo.find_all(&MuscleGroupFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["biceps brachii", "Obliques", "Trapezius"]);

        let upper = repo
            .find_all(&MuscleGroupFilter {
                body: Some(BodyRegion::Upper),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(upper.len(), 2);

        let by_name = repo
            .find_all(&MuscleGroupFilter {
                name: Some("BICEPS".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let repo = repo().await;
        let created = repo.create(group("Soleus", BodyRegion::Lower)).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                MuscleGroupPatch {
                    description: Some("Deep calf muscle".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Soleus");
        assert_eq!(updated.description, "Deep calf muscle");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_and_invalid_ids() {
        let repo = repo().await;
        let missing = new_id();

        assert!(repo.find_by_id(&missing).await.unwrap_err().is_not_found());
        assert!(repo
            .update(&missing, MuscleGroupPatch::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete(&missing).await.unwrap_err().is_not_found());

        let err = repo.find_by_id("").await.unwrap_err();
        assert_eq!(err.code(), "MUSCLE_GROUP_INVALID_ID");
    }
}
