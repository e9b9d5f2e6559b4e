//! HTTP-level tests for the `/api/v1/movies` resource.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router,
//! backed by the fixed-response movie store so no database is needed.

mod common;

use axum::http::StatusCode;
use cinema_core::runtime::Runtime;
use cinema_db::models::movie::Movie;
use cinema_db::repositories::MockMovieRepo;
use common::{body_json, build_test_app, get, patch_json, post_json, send_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arrival() -> Movie {
    Movie {
        id: 1,
        created_at: chrono::Utc::now(),
        title: "Arrival".to_string(),
        year: 2016,
        runtime: Runtime(116),
        genres: vec!["drama".to_string(), "sci-fi".to_string()],
        version: 1,
    }
}

fn seeded_app() -> axum::Router {
    build_test_app(MockMovieRepo::with_movie(arrival()))
}

// ---------------------------------------------------------------------------
// POST /api/v1/movies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_runtime_string() {
    let app = build_test_app(MockMovieRepo::new());
    let response = post_json(
        app,
        "/api/v1/movies",
        json!({
            "title": "Arrival",
            "year": 2016,
            "runtime": "116 mins",
            "genres": ["drama", "sci-fi"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(json["data"]["runtime"], "116 mins");
    assert!(json["data"].get("created_at").is_none());
}

#[tokio::test]
async fn create_reports_every_invalid_field() {
    let app = build_test_app(MockMovieRepo::new());
    let response = post_json(
        app,
        "/api/v1/movies",
        json!({
            "title": "",
            "year": 2016,
            "runtime": "116 mins",
            "genres": []
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["title"], "must be provided");
    assert_eq!(json["fields"]["genres"], "must contain at least 1 genre");
    assert!(json["fields"].get("year").is_none());
}

#[tokio::test]
async fn create_rejects_malformed_runtime() {
    let app = build_test_app(MockMovieRepo::new());
    let response = post_json(
        app,
        "/api/v1/movies",
        json!({
            "title": "Arrival",
            "year": 2016,
            "runtime": "116 minutes",
            "genres": ["drama"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("runtime"));
}

#[tokio::test]
async fn create_rejects_numeric_runtime() {
    let app = build_test_app(MockMovieRepo::new());
    let response = post_json(
        app,
        "/api/v1/movies",
        json!({
            "title": "Arrival",
            "year": 2016,
            "runtime": 116,
            "genres": ["drama"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_unparseable_body() {
    let app = build_test_app(MockMovieRepo::new());
    let response = send_json(app, axum::http::Method::POST, "/api/v1/movies", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// GET /api/v1/movies/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_existing_movie() {
    let response = get(seeded_app(), "/api/v1/movies/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Arrival");
    assert_eq!(json["data"]["genres"], json!(["drama", "sci-fi"]));
}

#[tokio::test]
async fn get_missing_movie_is_404() {
    let response = get(seeded_app(), "/api/v1/movies/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Movie with id 2 not found");
}

#[tokio::test]
async fn non_positive_or_garbage_id_is_400() {
    for uri in ["/api/v1/movies/0", "/api/v1/movies/-1", "/api/v1/movies/abc"] {
        let response = get(seeded_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid id parameter");
    }
}

// ---------------------------------------------------------------------------
// PATCH /api/v1/movies/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_bumps_version() {
    let response = patch_json(
        seeded_app(),
        "/api/v1/movies/1",
        json!({ "runtime": "117 mins" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["runtime"], "117 mins");
    assert_eq!(json["data"]["version"], 2);
    assert_eq!(json["data"]["title"], "Arrival");
}

#[tokio::test]
async fn patch_with_invalid_value_is_422() {
    let response = patch_json(seeded_app(), "/api/v1/movies/1", json!({ "year": 1980 })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["fields"]["year"], "must be greater than or equal to 1990");
}

#[tokio::test]
async fn patch_missing_movie_is_404() {
    let response = patch_json(seeded_app(), "/api/v1/movies/9", json!({ "title": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// GET /api/v1/movies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_page_and_metadata() {
    let response = get(seeded_app(), "/api/v1/movies?genres=drama&sort=-year").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["metadata"]["current_page"], 1);
    assert_eq!(json["metadata"]["page_size"], 20);
    assert_eq!(json["metadata"]["first_page"], 1);
    assert_eq!(json["metadata"]["last_page"], 1);
    assert_eq!(json["metadata"]["total_records"], 1);
}

#[tokio::test]
async fn empty_list_has_zero_metadata() {
    let app = build_test_app(MockMovieRepo::new());
    let response = get(app, "/api/v1/movies").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(
        json["metadata"],
        json!({
            "current_page": 0,
            "page_size": 0,
            "first_page": 0,
            "last_page": 0,
            "total_records": 0
        })
    );
}

#[tokio::test]
async fn unsafe_sort_is_rejected_before_the_store() {
    let response = get(seeded_app(), "/api/v1/movies?sort=budget").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["fields"]["sort"], "invalid sort value");
}

#[tokio::test]
async fn bad_paging_params_reported_together() {
    let response = get(seeded_app(), "/api/v1/movies?page=abc&page_size=500").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["fields"]["page"], "must be an integer value");
    assert_eq!(json["fields"]["page_size"], "must be a maximum of 100");
}
