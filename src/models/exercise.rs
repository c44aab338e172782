// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise model and its tag vocabularies.

use super::text_enum;
use super::{BodyRegion, Equipment, MuscleGroup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum ExerciseType as "exercise type" {
        Strength => "STRENGTH",
        Endurance => "ENDURANCE",
        Mobility => "MOBILITY",
    }
}

text_enum! {
    pub enum Difficulty as "difficulty" {
        Beginner => "BEGINNER",
        Intermediate => "INTERMEDIATE",
        Advanced => "ADVANCED",
    }
}

text_enum! {
    /// Movement pattern an exercise trains.
    pub enum Movement as "movement" {
        Push => "PUSH",
        Pull => "PULL",
        Squat => "SQUAT",
        Hinge => "HINGE",
        Lunge => "LUNGE",
        Carry => "CARRY",
        Core => "CORE",
    }
}

/// An exercise with its relations resolved.
///
/// Muscle groups and equipment are shared reference data; the lists keep the
/// order in which they were attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub muscle_groups: Vec<MuscleGroup>,
    pub difficulty: Vec<Difficulty>,
    pub equipment: Vec<Equipment>,
    pub movements: Vec<Movement>,
    pub video_url: Option<String>,
    pub image_urls: Vec<String>,
    pub is_archived: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new exercise. Relations are given by id.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub exercise_type: ExerciseType,
    pub muscle_group_ids: Vec<String>,
    pub difficulty: Vec<Difficulty>,
    pub equipment_ids: Vec<String>,
    pub movements: Vec<Movement>,
    pub video_url: Option<String>,
    pub image_urls: Vec<String>,
    pub is_archived: bool,
}

/// Partial update. A supplied list replaces that relation wholesale.
#[derive(Debug, Clone, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercise_type: Option<ExerciseType>,
    pub muscle_group_ids: Option<Vec<String>>,
    pub difficulty: Option<Vec<Difficulty>>,
    pub equipment_ids: Option<Vec<String>>,
    pub movements: Option<Vec<Movement>>,
    /// `Some(None)` clears the video
    pub video_url: Option<Option<String>>,
    pub image_urls: Option<Vec<String>>,
    pub is_archived: Option<bool>,
}

/// Listing filter. List-valued criteria match when any value matches.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub exercise_type: Option<ExerciseType>,
    pub muscle_group_ids: Vec<String>,
    /// Matches exercises with at least one muscle group in this region
    pub body: Option<BodyRegion>,
    pub difficulty: Vec<Difficulty>,
    pub equipment_ids: Vec<String>,
    /// `None` returns archived and active exercises alike
    pub is_archived: Option<bool>,
}
