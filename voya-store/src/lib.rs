pub mod app_config;
pub mod database;
pub mod quote_repo;
pub mod redis_repo;
pub mod request_repo;

pub use database::DbClient;
pub use quote_repo::PostgresQuoteRepository;
pub use redis_repo::RedisClient;
pub use request_repo::PostgresTravelRequestRepository;
