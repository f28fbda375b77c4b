use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Start with the demo deals instead of an empty store.
    #[serde(default = "default_seed")]
    pub seed_demo_deals: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_demo_deals: default_seed() }
    }
}

fn default_seed() -> bool { true }

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "khi_api=debug,khi_store=debug,tower_http=debug,axum::rejection=trace".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked developer overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `KHI__SERVER__PORT=8080` sets `server.port`
            .add_source(config::Environment::with_prefix("KHI").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let s = config::Config::builder()
            .set_override("server.port", 3000)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.store.seed_demo_deals);
        assert!(config.logging.filter.contains("khi_api=debug"));
    }

    #[test]
    fn test_seed_can_be_disabled() {
        let s = config::Config::builder()
            .set_override("server.port", 8080)
            .unwrap()
            .set_override("store.seed_demo_deals", false)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert!(!config.store.seed_demo_deals);
    }
}
