//! End-to-end API integration tests
//!
//! These tests drive the complete HTTP router against the in-memory store:
//! - Season lifecycle (create, start, end, delete)
//! - Partial updates and validation errors
//! - Match and team referential checks
//! - Cascading season deletion

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tourney_api::api::router;
use tourney_api::infrastructure::repositories::InMemoryStore;
use tower::util::ServiceExt; // for oneshot

/// Setup test application over a fresh store
fn setup_app() -> Router {
    router(Arc::new(InMemoryStore::new()))
}

/// Send a request with an optional JSON body and decode the JSON response
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_season_lifecycle_scenario() {
    let app = setup_app();

    // Step 1: Create season
    let (status, season) = send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(season["id"], 1);
    assert_eq!(season["name"], "2024");
    assert_eq!(season["status"], "pending");
    assert!(season["start"].is_null());

    // Step 2: Start it
    let (status, season) = send(&app, "POST", "/seasons/1/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(season["status"], "ongoing");
    assert!(season["start"].is_string());

    // Step 3: Starting again is an invalid transition
    let (status, error) = send(&app, "POST", "/seasons/1/start", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());

    let (_, season) = send(&app, "GET", "/seasons/1", None).await;
    assert_eq!(season["status"], "ongoing");

    // Step 4: End it
    let (status, season) = send(&app, "POST", "/seasons/1/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(season["status"], "completed");
    assert!(season["end"].is_string());

    // Step 5: Delete it
    let (status, _) = send(&app, "DELETE", "/seasons/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/seasons/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_season_validation() {
    let app = setup_app();

    let (status, error) = send(
        &app,
        "POST",
        "/seasons",
        Some(json!({ "id": 5, "name": "2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "ID must be None");

    let (status, error) = send(&app, "POST", "/seasons", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Name must be provided");

    let (status, _) = send(
        &app,
        "POST",
        "/seasons",
        Some(json!({
            "name": "2024",
            "start": "2024-06-01T00:00:00Z",
            "end": "2024-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, seasons) = send(&app, "GET", "/seasons", None).await;
    assert_eq!(seasons.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_partial_update_keeps_unset_fields() {
    let app = setup_app();
    send(
        &app,
        "POST",
        "/seasons",
        Some(json!({
            "name": "2024",
            "start": "2024-01-01T00:00:00Z",
            "end": "2024-12-31T00:00:00Z"
        })),
    )
    .await;

    let (status, season) = send(
        &app,
        "PATCH",
        "/seasons/1",
        Some(json!({ "status": "ongoing" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(season["status"], "ongoing");
    assert_eq!(season["name"], "2024");
    assert_eq!(season["start"], "2024-01-01T00:00:00Z");
    assert_eq!(season["end"], "2024-12-31T00:00:00Z");

    // Explicit null clears a nullable field
    let (status, season) = send(&app, "PATCH", "/seasons/1", Some(json!({ "end": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(season["end"].is_null());
    assert_eq!(season["start"], "2024-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_update_missing_season_is_not_found() {
    let app = setup_app();

    let (status, _) = send(&app, "PATCH", "/seasons/3", Some(json!({ "name": "x" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request_with_json_error() {
    let app = setup_app();
    send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;

    let (status, error) = send(
        &app,
        "PATCH",
        "/seasons/1",
        Some(json!({ "status": "bogus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string(), "Expected JSON error body: {}", error);

    let (status, error) = send(&app, "PATCH", "/seasons/1", Some(json!({ "name": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());

    let (status, _) = send(&app, "POST", "/teams", Some(json!({ "name": ["x"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        "/seasons/1",
        Some(json!({
            "start": "2024-06-01T00:00:00Z",
            "end": "2024-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_match_requires_existing_season() {
    let app = setup_app();

    let (status, error) = send(
        &app,
        "POST",
        "/matches",
        Some(json!({ "name": "Opener", "season_id": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Season not found");

    let (_, matches) = send(&app, "GET", "/matches", None).await;
    assert_eq!(matches.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_match_crud_and_lifecycle() {
    let app = setup_app();
    send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;

    let (status, game) = send(
        &app,
        "POST",
        "/matches",
        Some(json!({ "name": "Opener", "season_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["id"], 1);
    assert_eq!(game["season_id"], 1);

    // Unassigned match
    let (status, game) = send(&app, "POST", "/matches", Some(json!({ "name": "Friendly" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(game["season_id"].is_null());

    let (_, filtered) = send(&app, "GET", "/matches?season_id=1", None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (_, children) = send(&app, "GET", "/seasons/1/matches", None).await;
    assert_eq!(children.as_array().unwrap().len(), 1);
    assert_eq!(children[0]["name"], "Opener");

    let (status, _) = send(&app, "POST", "/matches/1/end", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, game) = send(&app, "POST", "/matches/1/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["status"], "ongoing");

    let (status, game) = send(&app, "POST", "/matches/1/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["status"], "completed");

    // Season untouched by match transitions
    let (_, season) = send(&app, "GET", "/seasons/1", None).await;
    assert_eq!(season["status"], "pending");

    let (status, _) = send(
        &app,
        "PATCH",
        "/matches/2",
        Some(json!({ "season_id": 77 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, game) = send(&app, "PATCH", "/matches/2", Some(json!({ "season_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["season_id"], 1);
    assert_eq!(game["name"], "Friendly");

    let (status, _) = send(&app, "DELETE", "/matches/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/matches/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_rules() {
    let app = setup_app();
    send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;

    let (status, error) = send(&app, "POST", "/teams", Some(json!({ "name": "Owls" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Season ID must be provided");

    let (status, _) = send(
        &app,
        "POST",
        "/teams",
        Some(json!({ "name": "Owls", "season_id": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, team) = send(
        &app,
        "POST",
        "/teams",
        Some(json!({ "name": "Owls", "color": "brown", "season_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["id"], 1);
    assert_eq!(team["color"], "brown");

    let (status, _) = send(
        &app,
        "POST",
        "/teams",
        Some(json!({ "name": "Owls", "season_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, team) = send(&app, "PATCH", "/teams/1", Some(json!({ "color": "grey" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["name"], "Owls");
    assert_eq!(team["color"], "grey");

    let (status, _) = send(&app, "PATCH", "/teams/1", Some(json!({ "name": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, teams) = send(&app, "GET", "/seasons/1/teams", None).await;
    assert_eq!(teams.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", "/teams/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", "/teams/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_season_cascades() {
    let app = setup_app();
    send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;
    send(&app, "POST", "/seasons", Some(json!({ "name": "2025" }))).await;

    for name in ["a", "b", "c"] {
        send(
            &app,
            "POST",
            "/matches",
            Some(json!({ "name": name, "season_id": 1 })),
        )
        .await;
    }
    send(
        &app,
        "POST",
        "/matches",
        Some(json!({ "name": "kept", "season_id": 2 })),
    )
    .await;
    for name in ["Owls", "Hawks"] {
        send(
            &app,
            "POST",
            "/teams",
            Some(json!({ "name": name, "season_id": 1 })),
        )
        .await;
    }

    let (status, _) = send(&app, "DELETE", "/seasons/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, matches) = send(&app, "GET", "/matches", None).await;
    let matches = matches.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "kept");

    let (_, teams) = send(&app, "GET", "/teams", None).await;
    assert_eq!(teams.as_array().unwrap().len(), 0);

    let (status, _) = send(&app, "GET", "/seasons/1/matches", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_seasons_filter() {
    let app = setup_app();
    send(&app, "POST", "/seasons", Some(json!({ "name": "2024" }))).await;
    send(&app, "POST", "/seasons", Some(json!({ "name": "2025" }))).await;

    let (_, all) = send(&app, "GET", "/seasons", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, one) = send(&app, "GET", "/seasons?season_id=2", None).await;
    let one = one.as_array().unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0]["name"], "2025");
}
