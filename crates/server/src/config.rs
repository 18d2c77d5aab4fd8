//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration, loaded from UPTRACK_* environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Instance name used in structured log events
    #[serde(default = "default_instance")]
    pub instance: String,

    /// HTTP port for reports, ingestion and probes
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bound on one check store query, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_instance() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "uptrack".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_fetch_timeout() -> u64 {
    10
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("UPTRACK"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            instance: default_instance(),
            api_port: default_api_port(),
            fetch_timeout_secs: default_fetch_timeout(),
        }))
    }
}
