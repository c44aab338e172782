// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muscle groups targeted by exercises.

use super::text_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

text_enum! {
    /// Coarse body region a muscle group belongs to.
    pub enum BodyRegion as "body region" {
        Upper => "UPPER",
        Lower => "LOWER",
        Core => "CORE",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub body: BodyRegion,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new muscle group.
#[derive(Debug, Clone)]
pub struct NewMuscleGroup {
    pub name: String,
    pub description: String,
    pub body: BodyRegion,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MuscleGroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub body: Option<BodyRegion>,
}

/// Listing filter.
#[derive(Debug, Clone, Default)]
pub struct MuscleGroupFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub body: Option<BodyRegion>,
}
