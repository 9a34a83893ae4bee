use async_trait::async_trait;
use voya_quote::Quote;
use voya_request::TravelRequest;
use voya_shared::models::events::QuoteRespondedEvent;

/// Best-effort email dispatch on lifecycle transitions.
///
/// Callers swallow and log errors; delivery failure never rolls back the
/// data mutation that triggered it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// New request → agency inbox.
    async fn request_submitted(
        &self,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// New quote → client, with a deep link to the quote page.
    async fn quote_created(
        &self,
        quote: &Quote,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Quote answered → agency on rejection, client confirmation on acceptance.
    async fn quote_responded(
        &self,
        quote: &Quote,
        event: &QuoteRespondedEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
