pub mod app_config;
pub mod mock_source;
pub mod timeout;

pub use mock_source::MockFlightSource;
pub use timeout::TimeoutSource;
