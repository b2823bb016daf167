use async_trait::async_trait;
use skyscout_core::search::Flight;
use skyscout_core::source::{FlightSource, SourceError};
use std::time::Duration;

/// Bounds every call on the inner source. Expiry surfaces as
/// [`SourceError::Timeout`], separate from the inner source's own failures.
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

impl<S: FlightSource> TimeoutSource<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<S: FlightSource> FlightSource for TimeoutSource<S> {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<Flight>, SourceError> {
        match tokio::time::timeout(self.limit, self.inner.search(origin, destination, date)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Flight source exceeded {:?}", self.limit);
                Err(SourceError::Timeout(self.limit))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_source::MockFlightSource;

    struct Down;

    #[async_trait]
    impl FlightSource for Down {
        async fn search(&self, _: &str, _: &str, _: &str) -> Result<Vec<Flight>, SourceError> {
            Err(SourceError::Unavailable("503 Service Unavailable".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_source_times_out() {
        let slow = MockFlightSource::demo(Duration::from_secs(10)).unwrap();
        let source = TimeoutSource::new(slow, Duration::from_secs(2));

        let err = source.search("JFK", "LAX", "2026-01-18").await.unwrap_err();
        assert_eq!(err, SourceError::Timeout(Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_source_passes_through() {
        let fast = MockFlightSource::demo(Duration::from_millis(800)).unwrap();
        let source = TimeoutSource::new(fast, Duration::from_secs(2));
        assert_eq!(source.search("JFK", "LAX", "2026-01-18").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_inner_failure_is_not_a_timeout() {
        let source = TimeoutSource::new(Down, Duration::from_secs(2));
        let err = source.search("JFK", "LAX", "2026-01-18").await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
