use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Travel request status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Quoted,
    Accepted,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Quoted => "quoted",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "quoted" => Ok(RequestStatus::Quoted),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status: {}", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid status transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// The requested travel window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPeriod {
    pub start_date: String,
    pub end_date: String,
    pub flexible: bool,
}

/// Party composition by age band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerCounts {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl PassengerCounts {
    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// Everything the client tells us about the trip they want
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub travel_period: TravelPeriod,
    pub days_available: u32,
    pub passengers: PassengerCounts,
    pub destinations: Vec<String>,
    pub accommodation_types: Vec<String>,
    pub activities: Vec<String>,
    #[serde(default)]
    pub other_preferences: String,
}

/// A client's submitted trip preferences awaiting a quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRequest {
    pub id: Uuid,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub preferences: TravelPreferences,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TravelRequest {
    pub fn new(
        user_id: String,
        user_email: String,
        user_name: String,
        preferences: TravelPreferences,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_email,
            user_name,
            preferences,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition: Pending → Quoted (an agent created a quote).
    /// Re-quoting an already quoted request is a no-op on status.
    pub fn mark_quoted(&mut self) -> Result<(), TransitionError> {
        match self.status {
            RequestStatus::Pending | RequestStatus::Quoted => {
                self.status = RequestStatus::Quoted;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(TransitionError {
                from: other.to_string(),
                to: RequestStatus::Quoted.to_string(),
            }),
        }
    }

    /// Transition: Quoted → Accepted/Rejected (the client responded to a quote).
    /// A resolved request never returns to pending; the client submits a new one.
    pub fn resolve(&mut self, accepted: bool) -> Result<(), TransitionError> {
        let target = if accepted {
            RequestStatus::Accepted
        } else {
            RequestStatus::Rejected
        };

        if self.status != RequestStatus::Quoted {
            return Err(TransitionError {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }

        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences() -> TravelPreferences {
        TravelPreferences {
            travel_period: TravelPeriod {
                start_date: "2026-09-01".to_string(),
                end_date: "2026-09-10".to_string(),
                flexible: true,
            },
            days_available: 7,
            passengers: PassengerCounts {
                adults: 2,
                children: 1,
                infants: 0,
            },
            destinations: vec!["Paris".to_string()],
            accommodation_types: vec!["Hotel".to_string()],
            activities: vec!["Museums".to_string()],
            other_preferences: String::new(),
        }
    }

    fn request() -> TravelRequest {
        TravelRequest::new(
            "user-1".to_string(),
            "client@example.com".to_string(),
            "Ada Client".to_string(),
            preferences(),
        )
    }

    #[test]
    fn new_request_starts_pending() {
        let req = request();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.preferences.passengers.total(), 3);
    }

    #[test]
    fn quote_then_accept() {
        let mut req = request();
        req.mark_quoted().unwrap();
        assert_eq!(req.status, RequestStatus::Quoted);
        req.resolve(true).unwrap();
        assert_eq!(req.status, RequestStatus::Accepted);
    }

    #[test]
    fn quote_then_reject() {
        let mut req = request();
        req.mark_quoted().unwrap();
        req.resolve(false).unwrap();
        assert_eq!(req.status, RequestStatus::Rejected);
    }

    #[test]
    fn cannot_resolve_pending_request() {
        let mut req = request();
        assert!(req.resolve(true).is_err());
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn cannot_requote_resolved_request() {
        let mut req = request();
        req.mark_quoted().unwrap();
        req.resolve(false).unwrap();
        let err = req.mark_quoted().unwrap_err();
        assert_eq!(err.from, "rejected");
    }

    #[test]
    fn requote_quoted_request_is_noop() {
        let mut req = request();
        req.mark_quoted().unwrap();
        req.mark_quoted().unwrap();
        assert_eq!(req.status, RequestStatus::Quoted);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Quoted,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
        ] {
            let parsed: RequestStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("cancelled".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn preferences_use_camel_case_wire_format() {
        let json = serde_json::to_value(preferences()).unwrap();
        assert!(json.get("travelPeriod").is_some());
        assert!(json.get("daysAvailable").is_some());
        assert_eq!(json["travelPeriod"]["startDate"], "2026-09-01");
    }
}
