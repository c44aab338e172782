// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muscle group and equipment endpoints, end to end.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_muscle_group_lifecycle() {
    let (app, _) = common::create_test_app().await;

    let (status, created) = common::send(
        &app,
        "POST",
        "/api/muscle-groups",
        None,
        Some(json!({"name": "Deltoid", "description": "Shoulder", "body": "UPPER"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["body"], "UPPER");

    let (status, list) = common::send(&app, "GET", "/api/muscle-groups", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, one) =
        common::send(&app, "GET", &format!("/api/muscle-groups?id={id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["name"], "Deltoid");

    let (status, updated) = common::send(
        &app,
        "PUT",
        "/api/muscle-groups",
        None,
        Some(json!({"id": id, "name": "Anterior Deltoid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Anterior Deltoid");
    assert_eq!(updated["description"], "Shoulder");

    let (status, body) = common::send(
        &app,
        "DELETE",
        "/api/muscle-groups",
        None,
        Some(json!({"id": id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) =
        common::send(&app, "GET", &format!("/api/muscle-groups?id={id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MUSCLE_GROUP_NOT_FOUND");
}

#[tokio::test]
async fn test_muscle_group_filters() {
    let (app, _) = common::create_test_app().await;
    for (name, body) in [("Biceps", "UPPER"), ("Rectus Abdominis", "CORE"), ("Triceps", "UPPER")] {
        let (status, _) = common::send(
            &app,
            "POST",
            "/api/muscle-groups",
            None,
            Some(json!({"name": name, "description": "-", "body": body})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, upper) = common::send(&app, "GET", "/api/muscle-groups?body=UPPER", None, None).await;
    assert_eq!(upper.as_array().unwrap().len(), 2);

    let (_, found) = common::send(&app, "GET", "/api/muscle-groups?search=ceps", None, None).await;
    assert_eq!(found.as_array().unwrap().len(), 2);

    let (status, body) =
        common::send(&app, "GET", "/api/muscle-groups?body=ARMS", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_muscle_group_validation_details() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/muscle-groups",
        None,
        Some(json!({"name": "", "description": "", "body": "UPPER"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(common::error_fields(&body), vec!["description", "name"]);
    assert_eq!(body["details"][1]["message"], "Name is required");

    // Unknown enum tag is rejected while decoding the body.
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/muscle-groups",
        None,
        Some(json!({"name": "Neck", "description": "-", "body": "HEAD"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let (app, _) = common::create_test_app().await;

    let (status, body) =
        common::send(&app, "GET", "/api/muscle-groups?id=not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
    assert_eq!(body["code"], "MUSCLE_GROUP_INVALID_ID");

    let missing = uuid::Uuid::new_v4();
    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/equipment",
        None,
        Some(json!({"id": missing, "name": "Kettlebell"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EQUIPMENT_NOT_FOUND");
}

#[tokio::test]
async fn test_equipment_lifecycle() {
    let (app, _) = common::create_test_app().await;

    let (status, created) = common::send(
        &app,
        "POST",
        "/api/equipment",
        None,
        Some(json!({"name": "Barbell", "description": "Olympic bar", "category": "Free weights"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/equipment",
        None,
        Some(json!({"name": "Bench", "description": "Flat", "category": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_fields(&body), vec!["category"]);

    let (status, list) = common::send(&app, "GET", "/api/equipment", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) =
        common::send(&app, "DELETE", "/api/equipment", None, Some(json!({"id": id}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = common::send(&app, "GET", "/api/equipment", None, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (app, _) = common::create_test_app().await;
    let (status, body) = common::send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
