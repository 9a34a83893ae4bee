use async_trait::async_trait;
use uuid::Uuid;
use voya_quote::{Quote, QuoteDecision};
use voya_request::TravelRequest;

/// Outcome of the compare-and-set quote response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Both statuses were flipped.
    Applied,
    /// The quote was no longer pending; nothing was written.
    NotPending,
}

/// Repository trait for travel request data access
#[async_trait]
pub trait TravelRequestRepository: Send + Sync {
    async fn insert(
        &self,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<TravelRequest>, Box<dyn std::error::Error + Send + Sync>>;

    /// Requests owned by one user, newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>>;

    /// Every request, newest first. Agency-side listing.
    async fn list_all(
        &self,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for quote data access.
///
/// The two mutating operations are atomic units of work: each couples the
/// quote write with the owning request's status flip in one transaction.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Insert the quote and mark the referenced request `quoted`.
    async fn create(
        &self,
        quote: &Quote,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Quote>, Box<dyn std::error::Error + Send + Sync>>;

    /// Quotes owned by one user, newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Quote>, Box<dyn std::error::Error + Send + Sync>>;

    /// Compare-and-set: flip quote and request statuses iff the quote is
    /// still pending. Concurrent responders cannot both observe `Applied`.
    /// An unknown id also reports `NotPending` (nothing matched the set);
    /// callers resolve existence before responding.
    async fn respond(
        &self,
        id: Uuid,
        decision: QuoteDecision,
    ) -> Result<ResponseOutcome, Box<dyn std::error::Error + Send + Sync>>;
}
