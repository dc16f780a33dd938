//! TOML run configuration.
//!
//! Endpoints and the lookup credential are constructed once at startup and
//! passed by reference into the collaborators. Secrets never live in the
//! config file: `token_env` names the environment variable to resolve.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub store: StoreConfig,
    pub delivery: DeliveryConfig,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Base URL the document id is appended to.
    pub base_url: String,
    /// Environment variable holding the store's Authorization token.
    pub token_env: String,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryConfig {
    pub webhook_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "store.base_url must not be empty".into(),
            ));
        }
        if self.store.token_env.is_empty() {
            return Err(ConfigError::Validation(
                "store.token_env must not be empty".into(),
            ));
        }
        if self.delivery.webhook_url.is_empty() {
            return Err(ConfigError::Validation(
                "delivery.webhook_url must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the store token from the configured environment variable.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        std::env::var(&self.store.token_env).map_err(|_| {
            ConfigError::Validation(format!(
                "environment variable {} is not set",
                self.store.token_env
            ))
        })
    }
}
