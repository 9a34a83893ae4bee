use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::identity::Principal;
use crate::notifier::Notifier;
use crate::repository::{QuoteRepository, ResponseOutcome, TravelRequestRepository};
use voya_quote::{Quote, QuoteDecision, QuoteStatus};
use voya_request::{TravelPreferences, TravelRequest};
use voya_shared::models::events::{QuoteCreatedEvent, QuoteRespondedEvent, RequestSubmittedEvent};
use voya_shared::pii::Masked;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("store failure: {0}")]
    Store(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Fields an agent supplies when quoting a request.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub request_id: Uuid,
    pub title: String,
    pub description: String,
    pub itinerary: String,
    pub price: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
}

/// Enforces legal status transitions across the request and quote stores
/// and triggers the notifications tied to each transition.
///
/// Constructed once at the process entry point and handed to the HTTP
/// layer; all collaborators are injected.
pub struct LifecycleCoordinator {
    requests: Arc<dyn TravelRequestRepository>,
    quotes: Arc<dyn QuoteRepository>,
    notifier: Arc<dyn Notifier>,
}

impl LifecycleCoordinator {
    pub fn new(
        requests: Arc<dyn TravelRequestRepository>,
        quotes: Arc<dyn QuoteRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            requests,
            quotes,
            notifier,
        }
    }

    /// Persist a pending request, then notify the agency. Persistence
    /// failure is the caller's error; notification failure is logged and
    /// swallowed.
    pub async fn submit_request(
        &self,
        principal: &Principal,
        user_email: String,
        user_name: String,
        preferences: TravelPreferences,
    ) -> Result<TravelRequest, LifecycleError> {
        let request = TravelRequest::new(
            principal.user_id.clone(),
            user_email,
            user_name,
            preferences,
        );
        self.requests.insert(&request).await?;

        let event = RequestSubmittedEvent {
            request_id: request.id,
            user_name: request.user_name.clone(),
            user_email: Masked(request.user_email.clone()),
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(?event, "travel request submitted");

        if let Err(e) = self.notifier.request_submitted(&request).await {
            tracing::warn!(request_id = %request.id, error = %e, "agency notification failed");
        }

        Ok(request)
    }

    /// Persist a pending quote and flip the request to `quoted` in one
    /// store transaction, then notify the client.
    pub async fn create_quote(
        &self,
        agent: &Principal,
        fields: NewQuote,
    ) -> Result<Quote, LifecycleError> {
        let request = self
            .requests
            .get(fields.request_id)
            .await?
            .ok_or(LifecycleError::NotFound("travel request"))?;

        let quote = Quote::new(
            request.id,
            request.user_id.clone(),
            fields.title,
            fields.description,
            fields.itinerary,
            fields.price,
            fields.currency,
            fields.valid_until,
        );
        self.quotes.create(&quote).await?;

        let event = QuoteCreatedEvent {
            quote_id: quote.id,
            request_id: request.id,
            user_email: Masked(request.user_email.clone()),
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(?event, agent = %agent.user_id, "quote created");

        if let Err(e) = self.notifier.quote_created(&quote, &request).await {
            tracing::warn!(quote_id = %quote.id, error = %e, "client notification failed");
        }

        Ok(quote)
    }

    /// Apply the client's accept/reject decision. Preconditions: the quote
    /// exists, the caller owns it, and it is still pending. The flip itself
    /// is a compare-and-set in the store, so two concurrent responders
    /// cannot both win.
    pub async fn respond_to_quote(
        &self,
        principal: &Principal,
        quote_id: Uuid,
        decision: QuoteDecision,
    ) -> Result<Quote, LifecycleError> {
        let mut quote = self
            .quotes
            .get(quote_id)
            .await?
            .ok_or(LifecycleError::NotFound("quote"))?;

        if quote.user_id != principal.user_id {
            return Err(LifecycleError::Forbidden("quote belongs to another user"));
        }

        if quote.status != QuoteStatus::Pending {
            return Err(LifecycleError::InvalidState("quote already responded"));
        }

        match self.quotes.respond(quote_id, decision).await? {
            ResponseOutcome::Applied => {}
            ResponseOutcome::NotPending => {
                return Err(LifecycleError::InvalidState("quote already responded"));
            }
        }

        quote.status = decision.target_status();
        quote.updated_at = Utc::now();

        let event = QuoteRespondedEvent {
            quote_id,
            request_id: quote.request_id,
            user_name: principal.name.clone(),
            user_email: Masked(principal.email.clone()),
            accepted: decision.is_accept(),
            timestamp: Utc::now().timestamp(),
        };
        tracing::info!(?event, "quote responded");

        if let Err(e) = self.notifier.quote_responded(&quote, &event).await {
            tracing::warn!(quote_id = %quote.id, error = %e, "response notification failed");
        }

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::memory::MemoryStore;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::Mutex;
    use voya_request::{PassengerCounts, RequestStatus, TravelPeriod};

    /// Records which notifications fired; optionally fails every send.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }

        fn record(&self, kind: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.sent.lock().unwrap().push(kind.to_string());
            if self.fail {
                return Err("smtp unreachable".into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn request_submitted(
            &self,
            _request: &TravelRequest,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.record("request_submitted")
        }

        async fn quote_created(
            &self,
            _quote: &Quote,
            _request: &TravelRequest,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.record("quote_created")
        }

        async fn quote_responded(
            &self,
            _quote: &Quote,
            _event: &QuoteRespondedEvent,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.record("quote_responded")
        }
    }

    fn client() -> Principal {
        Principal {
            user_id: "user-1".to_string(),
            email: "client@example.com".to_string(),
            name: "Ada Client".to_string(),
            role: Role::Client,
        }
    }

    fn agent() -> Principal {
        Principal {
            user_id: "agent-1".to_string(),
            email: "agency@example.com".to_string(),
            name: "Vera Agent".to_string(),
            role: Role::Agent,
        }
    }

    fn preferences() -> TravelPreferences {
        TravelPreferences {
            travel_period: TravelPeriod {
                start_date: "2026-09-01".to_string(),
                end_date: "2026-09-08".to_string(),
                flexible: false,
            },
            days_available: 7,
            passengers: PassengerCounts {
                adults: 2,
                children: 0,
                infants: 0,
            },
            destinations: vec!["Paris".to_string()],
            accommodation_types: vec!["Hotel".to_string()],
            activities: vec!["Museums".to_string()],
            other_preferences: String::new(),
        }
    }

    fn coordinator_with(
        notifier: Arc<RecordingNotifier>,
    ) -> (LifecycleCoordinator, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let coordinator = LifecycleCoordinator::new(store.clone(), store.clone(), notifier);
        (coordinator, store)
    }

    fn new_quote(request_id: Uuid) -> NewQuote {
        NewQuote {
            request_id,
            title: "Paris Getaway".to_string(),
            description: "7 nights near the Marais".to_string(),
            itinerary: "Day 1: Louvre\nDay 2: Versailles".to_string(),
            price: 1200.0,
            currency: "USD".to_string(),
            valid_until: Utc::now() + Duration::days(14),
        }
    }

    #[tokio::test]
    async fn submit_yields_pending_request() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        let stored = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
        assert_eq!(notifier.sent(), vec!["request_submitted"]);
    }

    #[tokio::test]
    async fn submit_succeeds_when_notification_fails() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let (coordinator, _store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(notifier.sent(), vec!["request_submitted"]);
    }

    #[tokio::test]
    async fn create_quote_marks_request_quoted() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();

        let quote = coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.user_id, "user-1");

        let stored = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Quoted);
        assert_eq!(notifier.sent(), vec!["request_submitted", "quote_created"]);
    }

    #[tokio::test]
    async fn create_quote_survives_notification_failure() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();

        coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        let stored = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Quoted);
    }

    #[tokio::test]
    async fn create_quote_for_missing_request_is_not_found() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, _store) = coordinator_with(notifier.clone());

        let err = coordinator
            .create_quote(&agent(), new_quote(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn accept_resolves_both_entities() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();
        let quote = coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        let answered = coordinator
            .respond_to_quote(&client(), quote.id, QuoteDecision::Accept)
            .await
            .unwrap();
        assert_eq!(answered.status, QuoteStatus::Accepted);

        let stored_request = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_request.status, RequestStatus::Accepted);

        // Responding again is rejected without touching either entity.
        let err = coordinator
            .respond_to_quote(&client(), quote.id, QuoteDecision::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidState(_)));

        let stored_quote = QuoteRepository::get(store.as_ref(), quote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_quote.status, QuoteStatus::Accepted);
    }

    #[tokio::test]
    async fn reject_resolves_both_entities() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();
        let quote = coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        coordinator
            .respond_to_quote(&client(), quote.id, QuoteDecision::Reject)
            .await
            .unwrap();

        let stored_request = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_request.status, RequestStatus::Rejected);

        let stored_quote = QuoteRepository::get(store.as_ref(), quote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_quote.status, QuoteStatus::Rejected);
        assert_eq!(
            notifier.sent(),
            vec!["request_submitted", "quote_created", "quote_responded"]
        );
    }

    #[tokio::test]
    async fn respond_by_non_owner_is_forbidden_and_mutates_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, store) = coordinator_with(notifier.clone());

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();
        let quote = coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        let intruder = Principal {
            user_id: "user-2".to_string(),
            email: "other@example.com".to_string(),
            name: "Other".to_string(),
            role: Role::Client,
        };
        let err = coordinator
            .respond_to_quote(&intruder, quote.id, QuoteDecision::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Forbidden(_)));

        let stored_quote = QuoteRepository::get(store.as_ref(), quote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_quote.status, QuoteStatus::Pending);
        let stored_request = TravelRequestRepository::get(store.as_ref(), request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_request.status, RequestStatus::Quoted);
    }

    #[tokio::test]
    async fn respond_to_missing_quote_is_not_found() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (coordinator, _store) = coordinator_with(notifier);

        let err = coordinator
            .respond_to_quote(&client(), Uuid::new_v4(), QuoteDecision::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn respond_survives_notification_failure() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let (coordinator, store) = coordinator_with(notifier);

        let request = coordinator
            .submit_request(
                &client(),
                "client@example.com".to_string(),
                "Ada Client".to_string(),
                preferences(),
            )
            .await
            .unwrap();
        let quote = coordinator
            .create_quote(&agent(), new_quote(request.id))
            .await
            .unwrap();

        coordinator
            .respond_to_quote(&client(), quote.id, QuoteDecision::Accept)
            .await
            .unwrap();

        let stored_quote = QuoteRepository::get(store.as_ref(), quote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_quote.status, QuoteStatus::Accepted);
    }
}
