use std::sync::Arc;
use skyscout_core::{FlightSource, SearchController};
use tokio::sync::Mutex;

/// One controller per running service. The lock is never held across a
/// flight source call, see `search::search_flights`.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<SearchController>>,
}

impl AppState {
    pub fn new(source: Arc<dyn FlightSource>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(SearchController::new(source))),
        }
    }
}
