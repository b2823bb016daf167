use serde::Serialize;
use tracing::{debug, warn};
use crate::criteria::FilterCriteria;
use crate::filter::apply_filters;
use crate::search::{Flight, FlightQuery};

/// Generation marker handed out per query. Later queries carry larger tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QueryToken(u64);

impl QueryToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub enum Action {
    QueryStarted { token: QueryToken, query: FlightQuery },
    QuerySucceeded { token: QueryToken, flights: Vec<Flight> },
    QueryFailed { token: QueryToken, message: String },
    CriteriaReplaced(FilterCriteria),
    CriteriaCleared,
}

/// Everything the presentation layer reads.
///
/// `derived_flights` is always `apply_filters(raw_flights, criteria)`: every
/// action touching either input recomputes it in the same step.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    raw_flights: Vec<Flight>,
    criteria: FilterCriteria,
    derived_flights: Vec<Flight>,
    phase: QueryPhase,
    error: Option<String>,
    latest_token: QueryToken,
    last_query: Option<FlightQuery>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::QueryStarted { token, query } => {
                if token <= self.latest_token {
                    debug!("Ignoring out-of-order query start {:?}", token);
                    return self;
                }
                self.latest_token = token;
                self.last_query = Some(query);
                self.phase = QueryPhase::Loading;
                self.error = None;
            }
            Action::QuerySucceeded { token, flights } => {
                if !self.accepts_settlement(token) {
                    debug!("Discarding stale response for {:?}", token);
                    return self;
                }
                self.raw_flights = flights;
                self.recompute();
                self.phase = QueryPhase::Ready;
            }
            Action::QueryFailed { token, message } => {
                if !self.accepts_settlement(token) {
                    debug!("Discarding stale failure for {:?}", token);
                    return self;
                }
                self.error = Some(message);
                self.phase = QueryPhase::Failed;
            }
            Action::CriteriaReplaced(criteria) => {
                if let Err(err) = criteria.validate() {
                    warn!("Ignoring invalid criteria: {}", err);
                    return self;
                }
                self.criteria = criteria;
                self.recompute();
            }
            Action::CriteriaCleared => {
                self.criteria = FilterCriteria::default();
                self.derived_flights = self.raw_flights.clone();
            }
        }
        self
    }

    /// A settlement only lands for the newest query and only while it is
    /// still loading, so each query settles at most once.
    pub fn accepts_settlement(&self, token: QueryToken) -> bool {
        token == self.latest_token && self.phase == QueryPhase::Loading
    }

    fn recompute(&mut self) {
        self.derived_flights = apply_filters(&self.raw_flights, &self.criteria);
        debug!(
            "Derived {} of {} flights",
            self.derived_flights.len(),
            self.raw_flights.len()
        );
    }

    pub fn raw_flights(&self) -> &[Flight] {
        &self.raw_flights
    }

    pub fn derived_flights(&self) -> &[Flight] {
        &self.derived_flights
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn latest_token(&self) -> QueryToken {
        self.latest_token
    }

    pub fn last_query(&self) -> Option<&FlightQuery> {
        self.last_query.as_ref()
    }
}
