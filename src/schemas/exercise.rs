// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise bodies. Muscle groups and equipment are referenced by id.

use super::{double_option, non_blank, validate_urls};
use crate::models::exercise::{ExercisePatch, NewExercise};
use crate::models::{Difficulty, ExerciseType, Movement};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(default)]
    #[validate(length(min = 1, message = "Select at least one muscle group"))]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Select at least one difficulty level"))]
    pub difficulty: Vec<Difficulty>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[validate(url(message = "Invalid url"))]
    pub video_url: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_urls"))]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub is_archived: bool,
}

/// `PUT /api/exercises/{id}` body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseUpdateInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub exercise_type: Option<ExerciseType>,
    #[validate(length(min = 1, message = "Select at least one muscle group"))]
    pub muscle_groups: Option<Vec<String>>,
    #[validate(length(min = 1, message = "Select at least one difficulty level"))]
    pub difficulty: Option<Vec<Difficulty>>,
    pub equipment: Option<Vec<String>>,
    pub movements: Option<Vec<Movement>>,
    /// `null` clears the video
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "Invalid url"))]
    pub video_url: Option<Option<String>>,
    #[validate(custom(function = "validate_urls"))]
    pub image_urls: Option<Vec<String>>,
    pub is_archived: Option<bool>,
}

impl From<ExerciseInput> for NewExercise {
    fn from(input: ExerciseInput) -> Self {
        NewExercise {
            name: input.name,
            description: input.description.unwrap_or_default(),
            exercise_type: input.exercise_type,
            muscle_group_ids: input.muscle_groups,
            difficulty: input.difficulty,
            equipment_ids: input.equipment,
            movements: input.movements,
            video_url: non_blank(input.video_url),
            image_urls: input.image_urls,
            is_archived: input.is_archived,
        }
    }
}

impl From<ExerciseUpdateInput> for ExercisePatch {
    fn from(input: ExerciseUpdateInput) -> Self {
        ExercisePatch {
            name: input.name,
            description: input.description,
            exercise_type: input.exercise_type,
            muscle_group_ids: input.muscle_groups,
            difficulty: input.difficulty,
            equipment_ids: input.equipment,
            movements: input.movements,
            video_url: input.video_url.map(non_blank),
            image_urls: input.image_urls,
            is_archived: input.is_archived,
        }
    }
}
