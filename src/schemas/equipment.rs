// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::models::equipment::{EquipmentPatch, NewEquipment};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentUpdateInput {
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
}

impl From<EquipmentInput> for NewEquipment {
    fn from(input: EquipmentInput) -> Self {
        NewEquipment {
            name: input.name,
            description: input.description,
            category: input.category,
        }
    }
}

impl EquipmentUpdateInput {
    pub fn into_parts(self) -> (String, EquipmentPatch) {
        (
            self.id,
            EquipmentPatch {
                name: self.name,
                description: self.description,
                category: self.category,
            },
        )
    }
}
