// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use super::report;
use crate::error::Result;
use crate::models::user::NewUser;
use crate::models::User;
use crate::repositories::UserRepository;

/// Read access to the users created by the sign-in provider.
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User> {
        self.repo.find_by_id(id).await.map_err(report("user.find_by_id"))
    }

    /// Register a user. Only the sign-in flow and seeding call this.
    pub async fn create(&self, data: NewUser) -> Result<User> {
        let user = self.repo.create(data).await.map_err(report("user.create"))?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }
}
