// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Equipment routes, shaped like the muscle group ones.

use super::SuccessResponse;
use crate::error::Result;
use crate::models::equipment::EquipmentFilter;
use crate::models::Equipment;
use crate::schemas::{EquipmentInput, EquipmentUpdateInput, IdInput, ValidatedJson};
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
        "/api/equipment",
        get(get_equipment)
            .post(create_equipment)
            .put(update_equipment)
            .delete(delete_equipment),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct EquipmentQuery {
    pub id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EquipmentQuery>,
) -> Result<Response> {
    if let Some(id) = query.id {
        let item = state.equipment.find_by_id(&id).await?;
        return Ok(Json(item).into_response());
    }

    let blank_to_none = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let filter = EquipmentFilter {
        name: blank_to_none(query.search),
        category: blank_to_none(query.category),
    };
    let items: Vec<Equipment> = state.equipment.find_all(&filter).await?;
    Ok(Json(items).into_response())
}

async fn create_equipment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<EquipmentInput>,
) -> Result<(StatusCode, Json<Equipment>)> {
    let item = state.equipment.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_equipment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<EquipmentUpdateInput>,
) -> Result<Json<Equipment>> {
    let (id, patch) = input.into_parts();
    Ok(Json(state.equipment.update(&id, patch).await?))
}

async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<IdInput>,
) -> Result<Json<SuccessResponse>> {
    state.equipment.delete(&input.id).await?;
    Ok(SuccessResponse::ok())
}
