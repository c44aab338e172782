// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use super::report;
use crate::error::Result;
use crate::models::equipment::{EquipmentFilter, EquipmentPatch, NewEquipment};
use crate::models::Equipment;
use crate::repositories::{EquipmentRepository, Repository};

pub struct EquipmentService<R = EquipmentRepository> {
    repo: R,
}

impl<R> EquipmentService<R>
where
    R: Repository<
        Entity = Equipment,
        Filter = EquipmentFilter,
        Create = NewEquipment,
        Update = EquipmentPatch,
    >,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Equipment> {
        tracing::info!(id, "Finding equipment");
        self.repo
            .find_by_id(id)
            .await
            .map_err(report("equipment.find_by_id"))
    }

    pub async fn find_all(&self, filter: &EquipmentFilter) -> Result<Vec<Equipment>> {
        tracing::info!(category = ?filter.category, search = ?filter.name, "Listing equipment");
        self.repo
            .find_all(filter)
            .await
            .map_err(report("equipment.find_all"))
    }

    pub async fn create(&self, data: NewEquipment) -> Result<Equipment> {
        tracing::info!(name = %data.name, "Creating equipment");
        self.repo
            .create(data)
            .await
            .map_err(report("equipment.create"))
    }

    pub async fn update(&self, id: &str, data: EquipmentPatch) -> Result<Equipment> {
        tracing::info!(id, "Updating equipment");
        self.repo
            .update(id, data)
            .await
            .map_err(report("equipment.update"))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!(id, "Deleting equipment");
        self.repo
            .delete(id)
            .await
            .map_err(report("equipment.delete"))
    }
}
