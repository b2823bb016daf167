use async_trait::async_trait;
use skyscout_core::search::Flight;
use skyscout_core::source::{FlightSource, SourceError};
use std::time::Duration;

const CATALOG_JSON: &str = include_str!("../data/flights.json");

/// Parses the bundled demo catalog.
pub fn demo_catalog() -> Result<Vec<Flight>, SourceError> {
    Ok(serde_json::from_str(CATALOG_JSON)?)
}

/// Stand-in for a real shopping API: waits `latency`, then returns the same
/// catalog whatever route or date is asked for.
pub struct MockFlightSource {
    flights: Vec<Flight>,
    latency: Duration,
}

impl MockFlightSource {
    pub fn new(flights: Vec<Flight>, latency: Duration) -> Self {
        Self { flights, latency }
    }

    pub fn demo(latency: Duration) -> Result<Self, SourceError> {
        Ok(Self::new(demo_catalog()?, latency))
    }
}

#[async_trait]
impl FlightSource for MockFlightSource {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<Flight>, SourceError> {
        tracing::debug!(
            "Mock search {} -> {} on {}, replying in {:?}",
            origin,
            destination,
            date,
            self.latency
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.flights.clone())
    }
}
