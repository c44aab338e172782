// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log routes (session required).

use super::{parse_param, SuccessResponse};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::Workout;
use crate::schemas::{ValidatedJson, WorkoutInput, WorkoutUpdateInput};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutQuery {
    /// Earliest start time (RFC 3339), inclusive
    pub from: Option<String>,
    /// Latest start time (RFC 3339), inclusive
    pub to: Option<String>,
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<WorkoutQuery>,
) -> Result<Json<Vec<Workout>>> {
    let from: Option<DateTime<Utc>> = parse_param("from", query.from.as_deref())?;
    let to: Option<DateTime<Utc>> = parse_param("to", query.to.as_deref())?;
    Ok(Json(state.workouts.find_all(&user.user_id, from, to).await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.find_by_id(&user.user_id, &id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<WorkoutInput>,
) -> Result<(StatusCode, Json<Workout>)> {
    let workout = state.workouts.create(input.into_new(user.user_id)).await?;
    tracing::info!(workout_id = %workout.id, sets = workout.set_count(), "Workout logged");
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<WorkoutUpdateInput>,
) -> Result<Json<Workout>> {
    Ok(Json(
        state
            .workouts
            .update(&user.user_id, &id, input.into())
            .await?,
    ))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.workouts.delete(&user.user_id, &id).await?;
    Ok(SuccessResponse::ok())
}
