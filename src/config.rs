// Runtime configuration: where the location-area listing lives and how
// long a single request may take. Everything has a default so the binary
// runs without any setup.

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// First page of the PokeAPI location-area listing.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/location-area/";

/// Environment variable overriding the listing URL.
pub const BASE_URL_VAR: &str = "POKEDEX_API_URL";

/// Environment variable setting a request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "POKEDEX_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Settings shared by the HTTP client and the `map` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Build a config from `POKEDEX_API_URL` and `POKEDEX_TIMEOUT_SECS`,
    /// falling back to the public API with no timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(BASE_URL_VAR).ok().as_deref(),
            std::env::var(TIMEOUT_VAR).ok().as_deref(),
        )
    }

    /// Validate raw values as they would come from the environment.
    pub fn from_values(
        base_url: Option<&str>,
        timeout: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(raw) = base_url.map(str::trim).filter(|s| !s.is_empty()) {
            let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::InvalidUrl {
                    value: raw.to_string(),
                    reason: format!("unsupported scheme `{}`", url.scheme()),
                });
            }
            config.base_url = raw.to_string();
        }

        if let Some(raw) = timeout.map(str::trim).filter(|s| !s.is_empty()) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw.to_string()));
            }
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
