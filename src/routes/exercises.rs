// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalogue routes.

use super::{parse_list, parse_param, SuccessResponse};
use crate::error::Result;
use crate::models::exercise::ExerciseFilter;
use crate::models::Exercise;
use crate::schemas::{ExerciseInput, ExerciseUpdateInput, ValidatedJson};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/api/exercises/{id}",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

/// Raw query; values are parsed by hand so bad ones become field errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseQuery {
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,
    /// Comma separated
    pub difficulty: Option<String>,
    pub body: Option<String>,
    /// Comma separated muscle group ids
    pub muscle_group: Option<String>,
    /// Comma separated equipment ids
    pub equipment: Option<String>,
    pub search: Option<String>,
    pub include_archived: Option<String>,
    /// `true` lists only archived exercises
    pub archived: Option<String>,
}

impl ExerciseQuery {
    fn into_filter(self) -> Result<(ExerciseFilter, bool)> {
        let filter = ExerciseFilter {
            name: self.search.filter(|s| !s.trim().is_empty()),
            exercise_type: parse_param("type", self.exercise_type.as_deref())?,
            muscle_group_ids: parse_list("muscleGroup", self.muscle_group.as_deref())?,
            body: parse_param("body", self.body.as_deref())?,
            difficulty: parse_list("difficulty", self.difficulty.as_deref())?,
            equipment_ids: parse_list("equipment", self.equipment.as_deref())?,
            is_archived: parse_param("archived", self.archived.as_deref())?,
        };
        let include_archived =
            parse_param("includeArchived", self.include_archived.as_deref())?.unwrap_or(false);
        Ok((filter, include_archived))
    }
}

async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExerciseQuery>,
) -> Result<Json<Vec<Exercise>>> {
    let (filter, include_archived) = query.into_filter()?;
    let exercises = state.exercises.find_all(filter, include_archived).await?;
    Ok(Json(exercises))
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>> {
    Ok(Json(state.exercises.find_by_id(&id).await?))
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<ExerciseInput>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let exercise = state.exercises.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ExerciseUpdateInput>,
) -> Result<Json<Exercise>> {
    Ok(Json(state.exercises.update(&id, input.into()).await?))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.exercises.delete(&id).await?;
    Ok(SuccessResponse::ok())
}
