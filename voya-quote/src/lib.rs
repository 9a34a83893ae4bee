pub mod models;

pub use models::{Quote, QuoteDecision, QuoteError, QuoteStatus};
