use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState, travel_requests::CreatedResponse};
use voya_core::{NewQuote, Principal};
use voya_quote::{Quote, QuoteDecision, QuoteStatus};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    pub request_id: Uuid,
    pub title: String,
    pub description: String,
    pub itinerary: String,
    pub price: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: Uuid,
    pub request_id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub itinerary: String,
    pub price: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            request_id: quote.request_id,
            user_id: quote.user_id,
            title: quote.title,
            description: quote.description,
            itinerary: quote.itinerary,
            price: quote.price,
            currency: quote.currency,
            valid_until: quote.valid_until,
            status: quote.status,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /quotes
/// Quote a travel request (agency side)
pub async fn create_quote(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if !principal.is_agent() {
        return Err(AppError::AuthorizationError("agent role required".to_string()));
    }

    let quote = state
        .coordinator
        .create_quote(
            &principal,
            NewQuote {
                request_id: req.request_id,
                title: req.title,
                description: req.description,
                itinerary: req.itinerary,
                price: req.price,
                currency: req.currency,
                valid_until: req.valid_until,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: quote.id,
            message: "Quote created".to_string(),
        }),
    ))
}

/// GET /quotes
/// The caller's quotes, newest first
pub async fn list_quotes(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let quotes = state.quotes.list_for_user(&principal.user_id).await?;

    Ok(Json(quotes.into_iter().map(Into::into).collect()))
}

/// GET /quotes/{id}
/// Retrieve a single quote; owner-scoped
pub async fn get_quote(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state
        .quotes
        .get(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("quote not found".to_string()))?;

    if quote.user_id != principal.user_id {
        return Err(AppError::AuthorizationError(
            "quote belongs to another user".to_string(),
        ));
    }

    Ok(Json(quote.into()))
}

/// POST /quotes/{id}/accept
pub async fn accept_quote(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state
        .coordinator
        .respond_to_quote(&principal, quote_id, QuoteDecision::Accept)
        .await?;

    Ok(Json(quote.into()))
}

/// POST /quotes/{id}/reject
pub async fn reject_quote(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state
        .coordinator
        .respond_to_quote(&principal, quote_id, QuoteDecision::Reject)
        .await?;

    Ok(Json(quote.into()))
}
