// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User lookups.
//!
//! Users belong to the sign-in provider. `create` exists for that provider
//! and for seeding; nothing in the API writes users.

use super::{
    get_optional_timestamp, get_timestamp, log_operation, new_id, not_found, now, storage_error,
    validate_id, Entity, Operation, RepositoryError,
};
use crate::db::Database;
use crate::models::user::NewUser;
use crate::models::User;
use crate::time_utils::format_storage_timestamp;
use chrono::SubsecRound;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const ENTITY: Entity = Entity::User;

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

fn row_to_user(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        email_verified: get_optional_timestamp(row, "email_verified")?,
        image: row.try_get("image")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(
            r"
            SELECT id, name, email, email_verified, image, created_at, updated_at
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(storage_error(ENTITY, Operation::FindById))?
        .ok_or_else(|| not_found(ENTITY, id))?;

        row_to_user(&row).map_err(storage_error(ENTITY, Operation::FindById))
    }

    pub async fn create(&self, data: NewUser) -> Result<User, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);

        let email_verified = data.email_verified.map(|t| t.trunc_subsecs(6));
        let id = new_id();
        let now = now();
        let stamp = format_storage_timestamp(now);

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, email_verified, image, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(email_verified.map(format_storage_timestamp))
        .bind(&data.image)
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.pool())
        .await
        .map_err(storage_error(ENTITY, Operation::Create))?;

        Ok(User {
            id,
            name: data.name,
            email: data.email,
            email_verified,
            image: data.image,
            created_at: now,
            updated_at: now,
        })
    }
}
