use async_trait::async_trait;
use std::time::Duration;
use crate::search::Flight;

/// Supplies candidate flights for a route and date.
///
/// Implementations are free to ignore any of the inputs; callers must not
/// assume origin/destination filtering happens here.
#[async_trait]
pub trait FlightSource: Send + Sync {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<Flight>, SourceError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Flight source unavailable: {0}")]
    Unavailable(String),

    #[error("Flight source timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed flight payload: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::MalformedPayload(err.to_string())
    }
}
