// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::models::personal_record::NewPersonalRecord;
use crate::models::RecordKind;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecordInput {
    #[validate(length(min = 1, message = "Exercise is required"))]
    pub exercise_id: String,
    #[validate(length(min = 1, message = "Workout is required"))]
    pub workout_id: String,
    pub set_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[validate(range(min = 0.0, message = "Value cannot be negative"))]
    pub value: f64,
    /// Defaults to the time of the request
    pub achieved_at: Option<DateTime<Utc>>,
}

impl PersonalRecordInput {
    pub fn into_new(self, now: DateTime<Utc>) -> NewPersonalRecord {
        NewPersonalRecord {
            exercise_id: self.exercise_id,
            workout_id: self.workout_id,
            set_id: self.set_id,
            kind: self.kind,
            value: self.value,
            achieved_at: self.achieved_at.unwrap_or(now),
        }
    }
}
