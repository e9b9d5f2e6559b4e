//! Handlers for the `/movies` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::filters::validate_filters;
use cinema_core::types::DbId;
use cinema_core::validator::Validator;
use cinema_db::models::movie::{CreateMovie, UpdateMovie};

use crate::error::{AppError, AppResult};
use crate::query::MovieListParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Parse a path id, rejecting anything that is not an integer >= 1.
pub fn parse_movie_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.parse::<DbId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(CoreError::Validation("invalid id parameter".to_string())),
    }
}

/// Unwrap a JSON body, turning extractor rejections (including a malformed
/// runtime string) into a JSON 400.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/movies?title=&genres=&page=&page_size=&sort=
///
/// Search movies by title text and genres, one page at a time.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    let search = params.parse(&mut v);
    validate_filters(&mut v, &search.filters);
    v.into_result()?;

    let (movies, metadata) = state
        .movies
        .search(&search.title, &search.genres, &search.filters)
        .await?;
    Ok(Json(PageResponse {
        data: movies,
        metadata,
    }))
}

/// POST /api/v1/movies
///
/// Create a new movie.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateMovie>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = json_body(body)?;
    input.validate()?;

    let movie = state.movies.insert(&input).await?;
    tracing::info!(movie_id = movie.id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// GET /api/v1/movies/{id}
///
/// Get a single movie by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_movie_id(&raw_id)?;
    let movie = state.movies.get_by_id(id).await?;
    Ok(Json(DataResponse { data: movie }))
}

/// PATCH /api/v1/movies/{id}
///
/// Apply the supplied fields to the current copy and write it back if no
/// one else has changed it in the meantime.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateMovie>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = parse_movie_id(&raw_id)?;
    let mut movie = state.movies.get_by_id(id).await?;

    let patch = json_body(body)?;
    movie.apply(patch);
    movie.validate()?;

    let updated = state.movies.update(&movie).await?;
    tracing::info!(movie_id = updated.id, version = updated.version, "Movie updated");
    Ok(Json(DataResponse { data: updated }))
}
