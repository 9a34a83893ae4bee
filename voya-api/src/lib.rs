use axum::{
    extract::{ConnectInfo, State},
    http::Method,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod quotes;
pub mod state;
pub mod travel_requests;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Any authenticated session; agent-only writes narrow in the handler.
    let session_routes = Router::new()
        .route(
            "/travel-requests",
            post(travel_requests::submit_request).get(travel_requests::list_requests),
        )
        .route(
            "/quotes",
            post(quotes::create_quote).get(quotes::list_quotes),
        )
        .route("/quotes/{id}", get(quotes::get_quote))
        .route("/quotes/{id}/accept", post(quotes::accept_quote))
        .route("/quotes/{id}/reject", post(quotes::reject_quote))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::session_auth_middleware,
        ));

    // Agency-side reads
    let agent_routes = Router::new()
        .route("/admin/travel-requests", get(admin::list_requests))
        .route("/admin/travel-requests/{id}", get(admin::get_request))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::agent_auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(session_routes)
        .merge(agent_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let Some(redis) = state.redis.as_ref() else {
        return Ok(next.run(req).await);
    };

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let key = format!("ratelimit:{}", ip);

    match redis.check_rate_limit(&key, 100, 60).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((axum::http::StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")),
        Err(_) => Ok(next.run(req).await), // Fail open
    }
}
