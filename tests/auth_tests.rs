// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session resolution: cookie and bearer tokens.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use workout_tracker::middleware::auth::SESSION_COOKIE;

mod common;

#[tokio::test]
async fn test_me_with_bearer_token() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) = common::seed_user(&state, "lifter@example.com").await;

    let (status, me) = common::send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user_id.as_str());
    assert_eq!(me["email"], "lifter@example.com");
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) = common::seed_user(&state, "lifter@example.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    let me: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(me["id"], user_id.as_str());
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let (app, state) = common::create_test_app().await;
    let (user_id, _) = common::seed_user(&state, "lifter@example.com").await;
    let forged = common::create_test_jwt(&user_id, b"some_other_secret_of_enough_size!");

    let (status, body) = common::send(&app, "GET", "/api/me", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(
        &uuid::Uuid::new_v4().to_string(),
        &state.config.session_secret,
    );

    let (status, body) = common::send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_reference_data_is_public() {
    let (app, _) = common::create_test_app().await;
    for uri in ["/api/exercises", "/api/muscle-groups", "/api/equipment"] {
        let (status, _) = common::send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}
