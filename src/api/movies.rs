use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, CreateMovieRequest, ListMoviesQuery, MovieDto, RemovalDto,
    UpdateMovieRequest,
};
use crate::api::validation::{validate_movie_id, validate_notes, validate_title};

/// `POST /api/movies`
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MovieDto>>), ApiError> {
    let title = validate_title(payload.title.as_deref())?;
    let notes = validate_notes(payload.notes.as_deref())?;

    let movie = state.catalog.create(title, notes).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MovieDto::from(movie))),
    ))
}

/// `GET /api/movies?sort_by=&order=&title=&search=`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMoviesQuery>,
) -> Result<Json<ApiResponse<Vec<MovieDto>>>, ApiError> {
    let movies = state
        .catalog
        .list(
            query.sort_by.as_deref(),
            query.order.as_deref(),
            &query.filters(),
        )
        .await?;

    Ok(Json(ApiResponse::success(
        movies.into_iter().map(MovieDto::from).collect(),
    )))
}

/// `GET /api/movies/{id}`
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieDto>>, ApiError> {
    let id = validate_movie_id(id)?;
    let movie = state.catalog.get(id).await?;
    Ok(Json(ApiResponse::success(movie.into())))
}

/// `PATCH /api/movies/{id}`
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMovieRequest>,
) -> Result<Json<ApiResponse<MovieDto>>, ApiError> {
    let id = validate_movie_id(id)?;
    let notes = validate_notes(payload.notes.as_deref())?;

    let movie = state.catalog.update(id, notes).await?;
    Ok(Json(ApiResponse::success(movie.into())))
}

/// `DELETE /api/movies/{id}`
pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RemovalDto>>, ApiError> {
    let id = validate_movie_id(id)?;
    let removal = state.catalog.remove(id).await?;

    Ok(Json(ApiResponse::success(RemovalDto {
        id: removal.id.value(),
        message: removal.message,
    })))
}
