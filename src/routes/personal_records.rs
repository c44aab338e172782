// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal record routes (session required).

use super::{parse_param, SuccessResponse};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::personal_record::PersonalRecordFilter;
use crate::models::PersonalRecord;
use crate::schemas::{PersonalRecordInput, ValidatedJson};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/personal-records",
            get(list_personal_records).post(create_personal_record),
        )
        .route("/api/personal-records/{id}", delete(delete_personal_record))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecordQuery {
    pub exercise_id: Option<String>,
    pub workout_id: Option<String>,
    /// Record kind: WEIGHT, REPS or DURATION
    pub kind: Option<String>,
}

async fn list_personal_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PersonalRecordQuery>,
) -> Result<Json<Vec<PersonalRecord>>> {
    let filter = PersonalRecordFilter {
        exercise_id: query.exercise_id,
        workout_id: query.workout_id,
        kind: parse_param("kind", query.kind.as_deref())?,
        ..Default::default()
    };
    Ok(Json(
        state.personal_records.find_all(&user.user_id, filter).await?,
    ))
}

async fn create_personal_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<PersonalRecordInput>,
) -> Result<(StatusCode, Json<PersonalRecord>)> {
    let record = state
        .personal_records
        .create(&user.user_id, input.into_new(chrono::Utc::now()))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_personal_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.personal_records.delete(&user.user_id, &id).await?;
    Ok(SuccessResponse::ok())
}
