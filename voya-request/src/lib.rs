pub mod models;

pub use models::{
    PassengerCounts, RequestStatus, TravelPeriod, TravelPreferences, TravelRequest,
    TransitionError,
};
