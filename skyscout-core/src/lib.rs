pub mod search;
pub mod criteria;
pub mod filter;
pub mod source;
pub mod state;
pub mod controller;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use controller::{SearchController, Settlement, QUERY_FAILED_MESSAGE};
pub use criteria::{ClockTime, CriteriaError, DepartureWindow, FilterCriteria};
pub use search::{Flight, FlightQuery};
pub use source::{FlightSource, SourceError};
pub use state::{Action, QueryPhase, QueryToken, SearchState};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid criteria: {0}")]
    Criteria(#[from] CriteriaError),
    #[error("Invalid query: {0}")]
    Form(#[from] view::FormError),
}
