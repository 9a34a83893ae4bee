use crate::pii::Masked;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct RequestSubmittedEvent {
    pub request_id: Uuid,
    pub user_name: String,
    pub user_email: Masked<String>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct QuoteCreatedEvent {
    pub quote_id: Uuid,
    pub request_id: Uuid,
    pub user_email: Masked<String>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct QuoteRespondedEvent {
    pub quote_id: Uuid,
    pub request_id: Uuid,
    pub user_name: String,
    pub user_email: Masked<String>,
    pub accepted: bool,
    pub timestamp: i64,
}
