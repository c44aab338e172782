// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal records: best values achieved on a specific set.

use super::text_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum RecordKind as "record kind" {
        Weight => "WEIGHT",
        Reps => "REPS",
        Duration => "DURATION",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub id: String,
    pub exercise_id: String,
    pub workout_id: String,
    /// Cleared when the set is replaced by a workout edit
    pub set_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Kilograms, repetitions, or seconds depending on `kind`
    pub value: f64,
    pub achieved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPersonalRecord {
    pub exercise_id: String,
    pub workout_id: String,
    pub set_id: Option<String>,
    pub kind: RecordKind,
    pub value: f64,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonalRecordPatch {
    pub kind: Option<RecordKind>,
    pub value: Option<f64>,
    pub achieved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonalRecordFilter {
    /// Records from workouts owned by this user
    pub user_id: Option<String>,
    pub exercise_id: Option<String>,
    pub workout_id: Option<String>,
    pub set_id: Option<String>,
    pub kind: Option<RecordKind>,
}
