use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use voya_core::{Principal, Role};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

fn decode_bearer(state: &AppState, req: &Request) -> Result<SessionClaims, StatusCode> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Decode and validate JWT
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    Ok(token_data.claims)
}

fn principal_from(claims: SessionClaims) -> Result<Principal, StatusCode> {
    let role: Role = claims.role.parse().map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Principal {
        user_id: claims.sub,
        email: claims.email,
        name: claims.name,
        role,
    })
}

// ============================================================================
// Session Authentication Middleware
// ============================================================================

/// Resolve an authenticated principal or fail with 401. Any valid session
/// role passes; handlers and the admin middleware narrow further.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = decode_bearer(&state, &req)?;
    let principal = principal_from(claims)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

// ============================================================================
// Agent Authentication Middleware
// ============================================================================

pub async fn agent_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = decode_bearer(&state, &req)?;
    let principal = principal_from(claims)?;

    if principal.role != Role::Agent {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
