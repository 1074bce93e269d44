use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ShowDto};
use crate::api::validation::{validate_show_id, validate_sort};
use crate::domain::EpisodeMarker;
use crate::models::{NewShow, ShowUpdate, WatchEntry};

#[derive(Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let sort = validate_sort(query.sort.as_deref())?;
    let shows = state.show_service().list_shows(sort).await?;
    Ok(Json(ApiResponse::success(shows)))
}

pub async fn get_show(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let show = state.show_service().get_show(id).await?;
    Ok(Json(ApiResponse::success(show)))
}

pub async fn create_show(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewShow>, JsonRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Json(new_show) = payload?;
    let show = state.show_service().create_show(new_show).await?;
    Ok(Json(ApiResponse::success(show)))
}

pub async fn update_show(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ShowUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let Json(update) = payload?;
    let show = state.show_service().update_show(id, update).await?;
    Ok(Json(ApiResponse::success(show)))
}

pub async fn delete_show(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    state.show_service().delete_show(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn mark_caught_up(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let show = state.show_service().mark_caught_up(id).await?;
    Ok(Json(ApiResponse::success(show)))
}

/// Body is a bare marker: `{"season": 2, "episode": 4}` or `"S02E04"`.
pub async fn mark_watched(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<EpisodeMarker>, JsonRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let Json(episode) = payload?;
    let show = state.show_service().mark_watched(id, episode).await?;
    Ok(Json(ApiResponse::success(show)))
}

pub async fn next_episode(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let show = state.show_service().next_episode(id).await?;
    Ok(Json(ApiResponse::success(show)))
}

pub async fn watch_history(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<WatchEntry>>>, ApiError> {
    let Path(id) = path?;
    let id = validate_show_id(id)?;
    let history = state.show_service().watch_history(id).await?;
    Ok(Json(ApiResponse::success(history)))
}
