use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::criteria::{CriteriaError, FilterCriteria};
use crate::search::{Flight, FlightQuery};
use crate::source::{FlightSource, SourceError};
use crate::state::{Action, QueryPhase, QueryToken, SearchState};

/// Shown to the user whenever the flight source fails.
pub const QUERY_FAILED_MESSAGE: &str = "Failed to load flights. Please try again.";

/// Outcome of settling a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Settlement {
    Applied { count: usize },
    Failed,
    Stale,
}

/// Owns the flight set for the current query, the active criteria and the
/// derived view. All mutation goes through [`SearchState::reduce`].
pub struct SearchController {
    source: Arc<dyn FlightSource>,
    state: SearchState,
}

impl SearchController {
    pub fn new(source: Arc<dyn FlightSource>) -> Self {
        Self {
            source,
            state: SearchState::new(),
        }
    }

    pub fn source(&self) -> Arc<dyn FlightSource> {
        self.source.clone()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Runs a query to completion against the configured source.
    pub async fn run_query(&mut self, origin: &str, destination: &str, date: &str) -> Settlement {
        let query = FlightQuery::new(origin, destination, date);
        let token = self.begin_query(query.clone());

        let result = self
            .source
            .search(&query.origin, &query.destination, &query.date)
            .await;

        self.complete_query(token, result)
    }

    /// Enters `Loading` and returns the token the eventual result must carry.
    pub fn begin_query(&mut self, query: FlightQuery) -> QueryToken {
        let token = self.state.latest_token().next();
        info!(
            "Searching flights {} -> {} on {} ({:?})",
            query.origin, query.destination, query.date, token
        );
        self.dispatch(Action::QueryStarted { token, query });
        token
    }

    pub fn complete_query(
        &mut self,
        token: QueryToken,
        result: Result<Vec<Flight>, SourceError>,
    ) -> Settlement {
        if !self.state.accepts_settlement(token) {
            debug!("Dropping superseded result for {:?}", token);
            return Settlement::Stale;
        }

        match result {
            Ok(flights) => {
                let count = flights.len();
                self.dispatch(Action::QuerySucceeded { token, flights });
                info!(
                    "Loaded {} flights, {} match current filters",
                    count,
                    self.state.derived_flights().len()
                );
                Settlement::Applied { count }
            }
            Err(err) => {
                warn!("Flight loading error: {}", err);
                self.dispatch(Action::QueryFailed {
                    token,
                    message: QUERY_FAILED_MESSAGE.to_string(),
                });
                Settlement::Failed
            }
        }
    }

    /// Replaces the criteria wholesale. Invalid criteria leave the state untouched.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), CriteriaError> {
        criteria.validate()?;
        self.dispatch(Action::CriteriaReplaced(criteria));
        Ok(())
    }

    pub fn clear_criteria(&mut self) {
        self.dispatch(Action::CriteriaCleared);
    }

    pub fn derived_flights(&self) -> &[Flight] {
        self.state.derived_flights()
    }

    pub fn raw_flights(&self) -> &[Flight] {
        self.state.raw_flights()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.state.criteria()
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn phase(&self) -> QueryPhase {
        self.state.phase()
    }

    pub fn last_query(&self) -> Option<&FlightQuery> {
        self.state.last_query()
    }
}
