//! In-memory store for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::repository::{QuoteRepository, ResponseOutcome, TravelRequestRepository};
use voya_quote::{Quote, QuoteStatus};
use voya_request::{RequestStatus, TravelRequest};

/// HashMap-backed implementation of both repositories. Shares one lock pair
/// so the quote operations can touch the owning request, mirroring the
/// transactional SQL implementation.
#[derive(Default)]
pub struct MemoryStore {
    requests: Mutex<HashMap<Uuid, TravelRequest>>,
    quotes: Mutex<HashMap<Uuid, Quote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TravelRequestRepository for MemoryStore {
    async fn insert(
        &self,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.requests
            .lock()
            .unwrap()
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.requests.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        let mut out: Vec<TravelRequest> = self
            .requests
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn list_all(
        &self,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        let mut out: Vec<TravelRequest> =
            self.requests.lock().unwrap().values().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

#[async_trait]
impl QuoteRepository for MemoryStore {
    async fn create(
        &self,
        quote: &Quote,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Lock order: quotes before requests, everywhere.
        let mut quotes = self.quotes.lock().unwrap();
        let mut requests = self.requests.lock().unwrap();

        let request = requests
            .get_mut(&quote.request_id)
            .ok_or("referenced travel request not found")?;
        request.status = RequestStatus::Quoted;
        request.updated_at = Utc::now();

        quotes.insert(quote.id, quote.clone());
        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Quote>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.quotes.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Quote>, Box<dyn std::error::Error + Send + Sync>> {
        let mut out: Vec<Quote> = self
            .quotes
            .lock()
            .unwrap()
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn respond(
        &self,
        id: Uuid,
        decision: voya_quote::QuoteDecision,
    ) -> Result<ResponseOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let mut quotes = self.quotes.lock().unwrap();
        let mut requests = self.requests.lock().unwrap();

        let Some(quote) = quotes.get_mut(&id) else {
            return Ok(ResponseOutcome::NotPending);
        };
        if quote.status != QuoteStatus::Pending {
            return Ok(ResponseOutcome::NotPending);
        }

        quote.status = decision.target_status();
        quote.updated_at = Utc::now();

        if let Some(request) = requests.get_mut(&quote.request_id) {
            request.status = if decision.is_accept() {
                RequestStatus::Accepted
            } else {
                RequestStatus::Rejected
            };
            request.updated_at = Utc::now();
        }

        Ok(ResponseOutcome::Applied)
    }
}
