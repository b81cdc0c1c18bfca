//! Application services for suggestion ingestion.

mod error;
mod negotiation;
mod suggestion;

pub use error::{FailedCandidate, SuggestionError, SuggestionResult};
pub use negotiation::ModelNegotiator;
pub use suggestion::{CONNECTION_MARKER, SuggestionService};
