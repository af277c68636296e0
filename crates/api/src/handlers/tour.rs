//! Handlers for the `/tours` resource.
//!
//! Bodies are validated by the [`Validated`] extractor before a handler runs;
//! the not-found policy lives in [`TourService`](crate::services::tour::TourService).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tourbook_core::tour::{CreateTour, UpdateTour};
use tourbook_db::models::tour::Tour;

use crate::error::AppResult;
use crate::extract::Validated;
use crate::state::AppState;

/// POST /tours
pub async fn create(
    State(state): State<AppState>,
    Validated(input): Validated<CreateTour>,
) -> AppResult<(StatusCode, Json<Tour>)> {
    let tour = state.tours.create(&input).await?;
    Ok((StatusCode::CREATED, Json(tour)))
}

/// GET /tours
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Tour>>> {
    let tours = state.tours.list().await?;
    Ok(Json(tours))
}

/// GET /tours/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tour>> {
    let tour = state.tours.get(&id).await?;
    Ok(Json(tour))
}

/// PUT /tours/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(input): Validated<UpdateTour>,
) -> AppResult<Json<Tour>> {
    let tour = state.tours.update(&id, &input).await?;
    Ok(Json(tour))
}

/// DELETE /tours/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.tours.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
