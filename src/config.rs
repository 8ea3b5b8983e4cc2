//! Runtime configuration.
//!
//! The price per point is fixed at build time. Only the lookup endpoint and
//! its transport timeout may be overridden from the environment.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::domain::{Currency, PricePerPoint, DEFAULT_PRICE_PER_POINT};

pub const DEFAULT_LOOKUP_ENDPOINT: &str =
    "https://functions.poehali.dev/88b420f9-0d05-40b4-9a44-9cc51ac92076";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_LOOKUP_URL: &str = "PARCEL_LOOKUP_URL";
pub const ENV_LOOKUP_TIMEOUT_SECS: &str = "PARCEL_LOOKUP_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PARCEL_LOOKUP_URL is not a valid URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("PARCEL_LOOKUP_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricingConfig {
    pub price_per_point: PricePerPoint,
    pub currency: Currency,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_point: DEFAULT_PRICE_PER_POINT,
            currency: Currency::RUB,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub pricing: PricingConfig,
    pub lookup: LookupConfig,
}

impl CalculatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = var(ENV_LOOKUP_URL).filter(|value| !value.trim().is_empty()) {
            let endpoint = endpoint.trim();
            Url::parse(endpoint)?;
            config.lookup.endpoint = endpoint.to_string();
        }

        if let Some(raw) = var(ENV_LOOKUP_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.lookup.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
