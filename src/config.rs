use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use validator::Validate;

use crate::{
    analytics::BillingSettings, domain::TimeOfUseTariff, live::FeedConfig,
    simulation::GeneratorConfig,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub generator: GeneratorConfig,
    #[validate(nested)]
    pub tariff: TimeOfUseTariff,
    #[validate(nested)]
    pub feed: FeedConfig,
    #[validate(nested)]
    pub billing: BillingSettings,
    #[validate(nested)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: false,
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Remote energy-data/auth service
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BackendConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(range(min = 1))]
    pub http_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            http_timeout_seconds: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("HEM__").split("__")),
        )
    }

    /// Extract and validate on top of the built-in defaults.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(figment)
            .extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
