// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::models::muscle_group::{MuscleGroupPatch, NewMuscleGroup};
use crate::models::BodyRegion;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroupInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub body: BodyRegion,
}

/// `PUT /api/muscle-groups` body: the id plus any fields to change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroupUpdateInput {
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub body: Option<BodyRegion>,
}

impl From<MuscleGroupInput> for NewMuscleGroup {
    fn from(input: MuscleGroupInput) -> Self {
        NewMuscleGroup {
            name: input.name,
            description: input.description,
            body: input.body,
        }
    }
}

impl MuscleGroupUpdateInput {
    /// Split into the target id and the patch.
    pub fn into_parts(self) -> (String, MuscleGroupPatch) {
        (
            self.id,
            MuscleGroupPatch {
                name: self.name,
                description: self.description,
                body: self.body,
            },
        )
    }
}
