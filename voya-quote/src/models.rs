use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Quote status. Terminal states are final; a quote is answered exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuoteStatus::Pending),
            "accepted" => Ok(QuoteStatus::Accepted),
            "rejected" => Ok(QuoteStatus::Rejected),
            other => Err(format!("unknown quote status: {}", other)),
        }
    }
}

/// The client's answer to a quote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteDecision {
    Accept,
    Reject,
}

impl QuoteDecision {
    pub fn target_status(&self) -> QuoteStatus {
        match self {
            QuoteDecision::Accept => QuoteStatus::Accepted,
            QuoteDecision::Reject => QuoteStatus::Rejected,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, QuoteDecision::Accept)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("quote already responded (status: {0})")]
    AlreadyResponded(QuoteStatus),
}

/// An agency-authored priced itinerary proposal tied to one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
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

impl Quote {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_id: Uuid,
        user_id: String,
        title: String,
        description: String,
        itinerary: String,
        price: f64,
        currency: String,
        valid_until: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            request_id,
            user_id,
            title,
            description,
            itinerary,
            price,
            currency,
            valid_until,
            status: QuoteStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Expiry is advisory: shown to the client and in email, never enforced
    /// as a transition precondition.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.valid_until
    }

    pub fn is_pending(&self) -> bool {
        self.status == QuoteStatus::Pending
    }

    /// Transition: Pending → Accepted/Rejected, exactly once.
    pub fn respond(&mut self, decision: QuoteDecision) -> Result<(), QuoteError> {
        if self.status != QuoteStatus::Pending {
            return Err(QuoteError::AlreadyResponded(self.status));
        }

        self.status = decision.target_status();
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn quote() -> Quote {
        Quote::new(
            Uuid::new_v4(),
            "user-1".to_string(),
            "Paris Getaway".to_string(),
            "7 nights in the Marais".to_string(),
            "Day 1: Louvre\nDay 2: Versailles".to_string(),
            1200.0,
            "USD".to_string(),
            Utc::now() + Duration::days(14),
        )
    }

    #[test]
    fn new_quote_is_pending() {
        let q = quote();
        assert!(q.is_pending());
        assert!(!q.is_expired());
    }

    #[test]
    fn accept_transitions_once() {
        let mut q = quote();
        q.respond(QuoteDecision::Accept).unwrap();
        assert_eq!(q.status, QuoteStatus::Accepted);

        let err = q.respond(QuoteDecision::Reject).unwrap_err();
        assert!(matches!(err, QuoteError::AlreadyResponded(QuoteStatus::Accepted)));
        assert_eq!(q.status, QuoteStatus::Accepted);
    }

    #[test]
    fn reject_transitions_once() {
        let mut q = quote();
        q.respond(QuoteDecision::Reject).unwrap();
        assert_eq!(q.status, QuoteStatus::Rejected);
        assert!(q.respond(QuoteDecision::Accept).is_err());
    }

    #[test]
    fn expired_quote_can_still_be_answered() {
        let mut q = quote();
        q.valid_until = Utc::now() - Duration::days(1);
        assert!(q.is_expired());
        q.respond(QuoteDecision::Accept).unwrap();
        assert_eq!(q.status, QuoteStatus::Accepted);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [QuoteStatus::Pending, QuoteStatus::Accepted, QuoteStatus::Rejected] {
            let parsed: QuoteStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn decision_maps_to_terminal_status() {
        assert_eq!(QuoteDecision::Accept.target_status(), QuoteStatus::Accepted);
        assert_eq!(QuoteDecision::Reject.target_status(), QuoteStatus::Rejected);
    }
}
