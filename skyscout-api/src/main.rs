use std::net::SocketAddr;
use std::sync::Arc;
use skyscout_api::{app, AppState};
use skyscout_store::{app_config::Config, MockFlightSource, TimeoutSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyscout_api=debug,skyscout_core=debug,skyscout_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting SkyScout API on port {}", config.server.port);

    let mock = MockFlightSource::demo(config.source.latency())?;
    let source = TimeoutSource::new(mock, config.source.timeout());

    let app = app(AppState::new(Arc::new(source)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
