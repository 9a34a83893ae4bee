use std::sync::Arc;

use voya_core::{LifecycleCoordinator, QuoteRepository, TravelRequestRepository};
use voya_store::RedisClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<LifecycleCoordinator>,
    pub requests: Arc<dyn TravelRequestRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    /// Rate limiting is skipped when Redis is not wired in (tests).
    pub redis: Option<Arc<RedisClient>>,
    pub auth: AuthConfig,
}
