// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Equipment persistence.

use super::{
    contains_pattern, get_timestamp, log_operation, new_id, not_found, now, storage_error,
    validate_id, Entity, Operation, Repository, RepositoryError,
};
use crate::db::Database;
use crate::models::equipment::{EquipmentFilter, EquipmentPatch, NewEquipment};
use crate::models::Equipment;
use crate::time_utils::format_storage_timestamp;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

const ENTITY: Entity = Entity::Equipment;

pub(crate) const COLUMNS: &str = "eq.id, eq.name, eq.description, eq.category, eq.created_at, eq.updated_at";

#[derive(Clone)]
pub struct EquipmentRepository {
    db: Database,
}

impl EquipmentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub(crate) fn row_to_equipment(row: &SqliteRow) -> Result<Equipment, sqlx::Error> {
    Ok(Equipment {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

#[async_trait]
impl Repository for EquipmentRepository {
    type Entity = Equipment;
    type Filter = EquipmentFilter;
    type Create = NewEquipment;
    type Update = EquipmentPatch;

    async fn find_by_id(&self, id: &str) -> Result<Equipment, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM equipment eq WHERE eq.id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))?
            .ok_or_else(|| not_found(ENTITY, id))?;

        row_to_equipment(&row).map_err(storage_error(ENTITY, Operation::FindById))
    }

    async fn find_all(&self, filter: &EquipmentFilter) -> Result<Vec<Equipment>, RepositoryError> {
        log_operation(ENTITY, Operation::FindAll, None);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM equipment eq WHERE 1 = 1"));
        if let Some(name) = &filter.name {
            query
                .push(" AND eq.name LIKE ")
                .push_bind(contains_pattern(name))
                .push(" ESCAPE '\\'");
        }
        if let Some(category) = &filter.category {
            query
                .push(" AND eq.category LIKE ")
                .push_bind(contains_pattern(category))
                .push(" ESCAPE '\\'");
        }
        query.push(" ORDER BY eq.name COLLATE NOCASE ASC, eq.id ASC");

        let rows = query
            .build()
            .fetch_all(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindAll))?;

        rows.iter()
            .map(row_to_equipment)
            .collect::<Result<_, _>>()
            .map_err(storage_error(ENTITY, Operation::FindAll))
    }

    async fn create(&self, data: NewEquipment) -> Result<Equipment, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);

        let id = new_id();
        let now = now();
        let stamp = format_storage_timestamp(now);

        sqlx::query(
            r"
            INSERT INTO equipment (id, name, description, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.pool())
        .await
        .map_err(storage_error(ENTITY, Operation::Create))?;

        Ok(Equipment {
            id,
            name: data.name,
            description: data.description,
            category: data.category,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: &str, data: EquipmentPatch) -> Result<Equipment, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Update, Some(id));

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE equipment SET ");
        let mut fields = query.separated(", ");
        if let Some(name) = data.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(description) = data.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(category) = data.category {
            fields.push("category = ").push_bind_unseparated(category);
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

        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
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

    #[tokio::test]
    async fn test_category_filter_is_case_insensitive() {
        let repo = EquipmentRepository::new(Database::in_memory().await.unwrap());
        for (name, category) in [
            ("Barbell", "Free weights"),
            ("Dumbbell", "Free weights"),
            ("Leg press", "Machines"),
        ] {
            repo.create(NewEquipment {
                name: name.to_string(),
                description: String::new(),
                category: category.to_string(),
            })
            .await
            .unwrap();
        }

        let free = repo
            .find_all(&EquipmentFilter {
                category: Some("free".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = free.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Barbell", "Dumbbell"]);
    }
}
