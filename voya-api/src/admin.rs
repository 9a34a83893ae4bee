use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState, travel_requests::TravelRequestResponse};

// ============================================================================
// Handlers (agency side; the agent middleware gates this whole group)
// ============================================================================

/// GET /admin/travel-requests
/// Every request in the system, newest first
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<TravelRequestResponse>>, AppError> {
    let requests = state.requests.list_all().await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// GET /admin/travel-requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<TravelRequestResponse>, AppError> {
    let request = state
        .requests
        .get(request_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("travel request not found".to_string()))?;

    Ok(Json(request.into()))
}
