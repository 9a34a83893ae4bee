use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use voya_core::Principal;
use voya_request::{RequestStatus, TravelPreferences, TravelRequest};
use voya_shared::pii::Masked;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTravelRequestRequest {
    pub preferences: TravelPreferences,
    pub user_email: String,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRequestResponse {
    pub id: Uuid,
    pub user_id: String,
    pub user_email: Masked<String>,
    pub user_name: String,
    pub preferences: TravelPreferences,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TravelRequest> for TravelRequestResponse {
    fn from(request: TravelRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            user_email: Masked(request.user_email),
            user_name: request.user_name,
            preferences: request.preferences,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /travel-requests
/// Submit travel preferences for quoting
pub async fn submit_request(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<SubmitTravelRequestRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let request = state
        .coordinator
        .submit_request(&principal, req.user_email, req.user_name, req.preferences)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: request.id,
            message: "Travel request created".to_string(),
        }),
    ))
}

/// GET /travel-requests
/// The caller's requests, newest first
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<TravelRequestResponse>>, AppError> {
    let requests = state.requests.list_for_user(&principal.user_id).await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}
