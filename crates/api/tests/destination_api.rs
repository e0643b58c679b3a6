//! HTTP-level integration tests for the destination endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, patch_json, post_json, put_json};
use serde_json::json;

fn names(list: &serde_json::Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|d| d["destination"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Collection resource
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_destination_returns_201_with_defaults() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations",
        json!({
            "destination": "Tokyo",
            "country": "Japan",
            "latitude": 35.6762,
            "longitude": 139.6503,
            "reason": "food",
            "timeline": "someday"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_i64());
    assert_eq!(json["rank"], 1);
    assert_eq!(json["destination"], "Tokyo");
    assert_eq!(json["latitude"], 35.6762);
    assert_eq!(json["longitude"], 139.6503);
    assert_eq!(json["timeline"], "someday");
    assert_eq!(json["budget"], "");
    assert!(json["image_url"].is_null());
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_without_coordinates_defaults_to_zero() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations",
        json!({"destination": "Atlantis", "country": "Ocean"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["latitude"].as_f64(), Some(0.0));
    assert_eq!(json["longitude"].as_f64(), Some(0.0));
    assert_eq!(json["timeline"], "unscheduled");
}

#[tokio::test]
async fn test_create_missing_country_returns_400() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations",
        json!({"destination": "Tokyo"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "country is required");
}

#[tokio::test]
async fn test_create_blank_destination_returns_400() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations",
        json!({"destination": "   ", "country": "Japan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_sorted_by_rank() {
    let app = common::build_test_app().await;
    create(&app, json!({"destination": "Cusco", "country": "Peru", "rank": 3})).await;
    create(&app, json!({"destination": "Oslo", "country": "Norway", "rank": 1})).await;
    create(&app, json!({"destination": "Hanoi", "country": "Vietnam", "rank": 2})).await;

    let response = get(&app, "/api/v1/destinations").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(names(&json), vec!["Oslo", "Hanoi", "Cusco"]);
}

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let app = common::build_test_app().await;
    let json = body_json(get(&app, "/api/v1/destinations").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_reorder_swaps_order() {
    let app = common::build_test_app().await;
    let a = create(&app, json!({"destination": "A", "country": "X", "rank": 1})).await;
    let b = create(&app, json!({"destination": "B", "country": "X", "rank": 2})).await;

    let response = patch_json(
        &app,
        "/api/v1/destinations",
        json!({"ranks": [{"id": a, "rank": 2}, {"id": b, "rank": 1}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let json = body_json(get(&app, "/api/v1/destinations").await).await;
    assert_eq!(names(&json), vec!["B", "A"]);
}

#[tokio::test]
async fn test_reorder_with_non_array_returns_400() {
    let app = common::build_test_app().await;
    let response = patch_json(
        &app,
        "/api/v1/destinations",
        json!({"ranks": "not-an-array"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_reorder_without_ranks_returns_400() {
    let app = common::build_test_app().await;
    let response = patch_json(&app, "/api/v1/destinations", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_with_zero_rank_returns_400() {
    let app = common::build_test_app().await;
    let a = create(&app, json!({"destination": "A", "country": "X"})).await;

    let response = patch_json(
        &app,
        "/api/v1/destinations",
        json!({"ranks": [{"id": a, "rank": 0}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_unknown_id_is_ignored() {
    let app = common::build_test_app().await;
    let response = patch_json(
        &app,
        "/api/v1/destinations",
        json!({"ranks": [{"id": 12345, "rank": 1}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Item resource
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_destination_by_id() {
    let app = common::build_test_app().await;
    let id = create(
        &app,
        json!({"destination": "Tokyo", "country": "Japan", "latitude": 35.6762, "longitude": 139.6503}),
    )
    .await;

    let response = get(&app, &format!("/api/v1/destinations/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["country"], "Japan");
    assert!(json["latitude"].is_f64());
    assert_eq!(json["latitude"], 35.6762);
}

#[tokio::test]
async fn test_get_nonexistent_destination_returns_404() {
    let app = common::build_test_app().await;
    let response = get(&app, "/api/v1/destinations/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_replace_destination() {
    let app = common::build_test_app().await;
    let id = create(
        &app,
        json!({"destination": "Tokyo", "country": "Japan", "reason": "food", "budget": "$$$"}),
    )
    .await;

    let response = put_json(
        &app,
        &format!("/api/v1/destinations/{id}"),
        json!({"destination": "Kyoto", "country": "Japan", "reason": "temples"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["destination"], "Kyoto");
    assert_eq!(json["reason"], "temples");
    // Fields the caller did not send keep their values.
    assert_eq!(json["budget"], "$$$");
}

#[tokio::test]
async fn test_replace_nonexistent_destination_returns_404() {
    let app = common::build_test_app().await;
    let response = put_json(
        &app,
        "/api/v1/destinations/999",
        json!({"destination": "Tokyo", "country": "Japan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_without_destination_returns_400() {
    let app = common::build_test_app().await;
    let id = create(&app, json!({"destination": "Tokyo", "country": "Japan"})).await;

    let response = put_json(
        &app,
        &format!("/api/v1/destinations/{id}"),
        json!({"country": "Japan"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_destination() {
    let app = common::build_test_app().await;
    let id = create(&app, json!({"destination": "Tokyo", "country": "Japan"})).await;

    let response = delete(&app, &format!("/api/v1/destinations/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    // Subsequent GET and DELETE should 404.
    let response = get(&app, &format!("/api/v1/destinations/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete(&app, &format!("/api/v1/destinations/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_move_down_renumbers_list() {
    let app = common::build_test_app().await;
    let a = create(&app, json!({"destination": "A", "country": "X", "rank": 1})).await;
    create(&app, json!({"destination": "B", "country": "X", "rank": 2})).await;
    create(&app, json!({"destination": "C", "country": "X", "rank": 3})).await;

    let response = post_json(
        &app,
        &format!("/api/v1/destinations/{a}/move"),
        json!({"direction": "down"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(names(&json), vec!["B", "A", "C"]);
    let ranks: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["rank"].as_i64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_move_nonexistent_destination_returns_404() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations/77/move",
        json!({"direction": "up"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Malformed bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_with_wrong_field_type_returns_400_json() {
    let app = common::build_test_app().await;
    let response = post_json(
        &app,
        "/api/v1/destinations",
        json!({"destination": 5, "country": "Japan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_reorder_with_null_body_returns_400_json() {
    let app = common::build_test_app().await;
    let response = patch_json(&app, "/api/v1/destinations", serde_json::Value::Null).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_replace_with_wrong_field_type_returns_400_json() {
    let app = common::build_test_app().await;
    let id = create(&app, json!({"destination": "Tokyo", "country": "Japan"})).await;

    let response = put_json(
        &app,
        &format!("/api/v1/destinations/{id}"),
        json!({"destination": "Tokyo", "country": "Japan", "latitude": "north"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_move_with_unknown_direction_returns_400_json() {
    let app = common::build_test_app().await;
    let id = create(&app, json!({"destination": "Tokyo", "country": "Japan"})).await;

    let response = post_json(
        &app,
        &format!("/api/v1/destinations/{id}/move"),
        json!({"direction": "sideways"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_with_wide_coordinates_round_trips() {
    let app = common::build_test_app().await;
    let id = create(
        &app,
        json!({
            "destination": "Tokyo",
            "country": "Japan",
            "latitude": 35.6768601,
            "longitude": 1000.0
        }),
    )
    .await;

    let json = body_json(get(&app, &format!("/api/v1/destinations/{id}")).await).await;
    assert_eq!(json["latitude"], 35.6768601);
    assert_eq!(json["longitude"], 1000.0);
}
