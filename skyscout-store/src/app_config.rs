use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Simulated round-trip of the demo catalog.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Upper bound on any single source call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_latency_ms() -> u64 { 800 }
fn default_timeout_ms() -> u64 { 5_000 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SourceConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layers `<dir>/default`, `<dir>/<run_mode>` and `<dir>/local`, then
    /// `SKYSCOUT_*` environment overrides (e.g. `SKYSCOUT_SERVER__PORT=9000`).
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(
                config::Environment::with_prefix("SKYSCOUT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_file_loads() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../config");
        let config = Config::load_from(dir, "test").expect("Failed to load config");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.source.latency(), Duration::from_millis(800));
        assert!(config.source.timeout() > config.source.latency());
    }

    #[test]
    fn test_missing_source_section_uses_defaults() {
        let source: SourceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(source.latency_ms, 800);
        assert_eq!(source.timeout_ms, 5_000);
    }
}
