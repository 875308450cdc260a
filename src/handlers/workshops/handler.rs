//! Workshop handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, models::Workshop,
    services::WorkshopService, state::AppState,
};

use super::{request::CreateWorkshopRequest, response::WorkshopListResponse};

/// List all workshops, newest first
pub async fn list_workshops(State(state): State<AppState>) -> AppResult<Json<WorkshopListResponse>> {
    let workshops = WorkshopService::list(state.db()).await?;

    Ok(Json(WorkshopListResponse {
        total: workshops.len(),
        workshops,
    }))
}

/// Get a workshop by ID
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Workshop>> {
    let workshop = WorkshopService::get(state.db(), &id).await?;
    Ok(Json(workshop))
}

/// Create a workshop
pub async fn create_workshop(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateWorkshopRequest>,
) -> AppResult<(StatusCode, Json<Workshop>)> {
    payload.validate()?;

    let workshop = WorkshopService::create(state.db(), &auth_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(workshop)))
}
