pub mod identity;
pub mod lifecycle;
pub mod memory;
pub mod notifier;
pub mod repository;

pub use identity::{Principal, Role};
pub use lifecycle::{LifecycleCoordinator, LifecycleError, NewQuote};
pub use notifier::Notifier;
pub use repository::{QuoteRepository, ResponseOutcome, TravelRequestRepository};
