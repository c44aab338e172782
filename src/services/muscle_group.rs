// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use super::report;
use crate::error::Result;
use crate::models::muscle_group::{MuscleGroupFilter, MuscleGroupPatch, NewMuscleGroup};
use crate::models::MuscleGroup;
use crate::repositories::{MuscleGroupRepository, Repository};

pub struct MuscleGroupService<R = MuscleGroupRepository> {
    repo: R,
}

impl<R> MuscleGroupService<R>
where
    R: Repository<
        Entity = MuscleGroup,
        Filter = MuscleGroupFilter,
        Create = NewMuscleGroup,
        Update = MuscleGroupPatch,
    >,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<MuscleGroup> {
        tracing::info!(id, "Finding muscle group");
        self.repo
            .find_by_id(id)
            .await
            .map_err(report("muscle_group.find_by_id"))
    }

    pub async fn find_all(&self, filter: &MuscleGroupFilter) -> Result<Vec<MuscleGroup>> {
        tracing::info!(body = ?filter.body, search = ?filter.name, "Listing muscle groups");
        self.repo
            .find_all(filter)
            .await
            .map_err(report("muscle_group.find_all"))
    }

    pub async fn create(&self, data: NewMuscleGroup) -> Result<MuscleGroup> {
        tracing::info!(name = %data.name, "Creating muscle group");
        let created = self
            .repo
            .create(data)
            .await
            .map_err(report("muscle_group.create"))?;
        tracing::info!(id = %created.id, "Muscle group created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, data: MuscleGroupPatch) -> Result<MuscleGroup> {
        tracing::info!(id, "Updating muscle group");
        self.repo
            .update(id, data)
            .await
            .map_err(report("muscle_group.update"))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!(id, "Deleting muscle group");
        self.repo
            .delete(id)
            .await
            .map_err(report("muscle_group.delete"))
    }
}
