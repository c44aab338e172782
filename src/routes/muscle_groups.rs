// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muscle group routes. Updates and deletes carry the id in the body.

use super::{parse_param, SuccessResponse};
use crate::error::Result;
use crate::models::muscle_group::MuscleGroupFilter;
use crate::schemas::{IdInput, MuscleGroupInput, MuscleGroupUpdateInput, ValidatedJson};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/muscle-groups",
        get(get_muscle_groups)
            .post(create_muscle_group)
            .put(update_muscle_group)
            .delete(delete_muscle_group),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct MuscleGroupQuery {
    /// Fetch a single muscle group instead of a list
    pub id: Option<String>,
    pub body: Option<String>,
    pub search: Option<String>,
}

/// A single muscle group when `id` is given, otherwise the filtered list.
async fn get_muscle_groups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MuscleGroupQuery>,
) -> Result<Response> {
    if let Some(id) = query.id {
        let group = state.muscle_groups.find_by_id(&id).await?;
        return Ok(Json(group).into_response());
    }

    let filter = MuscleGroupFilter {
        name: query.search.filter(|s| !s.trim().is_empty()),
        body: parse_param("body", query.body.as_deref())?,
    };
    let groups = state.muscle_groups.find_all(&filter).await?;
    Ok(Json(groups).into_response())
}

async fn create_muscle_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<MuscleGroupInput>,
) -> Result<Response> {
    let group = state.muscle_groups.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(group)).into_response())
}

async fn update_muscle_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<MuscleGroupUpdateInput>,
) -> Result<Response> {
    let (id, patch) = input.into_parts();
    let group = state.muscle_groups.update(&id, patch).await?;
    Ok(Json(group).into_response())
}

async fn delete_muscle_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<IdInput>,
) -> Result<Json<SuccessResponse>> {
    state.muscle_groups.delete(&input.id).await?;
    Ok(SuccessResponse::ok())
}
