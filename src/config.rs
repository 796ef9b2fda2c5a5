//! Environment-driven settings.
//!
//! # Environment Variables
//!
//! - `LISTINGS_SOURCE` - `fixture` or `remote` (default: fixture)
//! - `RAPIDAPI_KEY` - provider API key (no default; remote queries fall back without it)
//! - `RAPIDAPI_HOST` - value of the `x-rapidapi-host` header
//! - `LISTINGS_BASE_URL` - provider base URL
//! - `LISTINGS_PAGE_SIZE` - default query limit (default: 10)
//! - `LISTINGS_TIMEOUT_SECS` - HTTP timeout (default: 30)
//! - `USD_TO_INR`, `MARKET_ADJUSTMENT` - demo adapter price constants

use crate::models::DataSource;
use crate::sources::demo_adapter::AdapterSettings;
use crate::sources::types::DEFAULT_PAGE_SIZE;
use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "realty-in-us.p.rapidapi.com";
pub const DEFAULT_BASE_URL: &str = "https://realty-in-us.p.rapidapi.com";

/// Connection settings for the remote listings provider
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSettings {
    pub api_key: Option<String>,
    pub host: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Everything needed to build a `PropertyRepository`
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DataSource,
    pub page_size: usize,
    pub remote: RemoteSettings,
    pub adapter: AdapterSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DataSource::Fixture,
            page_size: DEFAULT_PAGE_SIZE,
            remote: RemoteSettings::default(),
            adapter: AdapterSettings::default(),
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read settings from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let source = match var("LISTINGS_SOURCE") {
            Some(raw) => raw
                .parse::<DataSource>()
                .map_err(|e| anyhow!(e))
                .context("Invalid LISTINGS_SOURCE")?,
            None => defaults.source,
        };

        let page_size: usize = parse_or(&var, "LISTINGS_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            anyhow::bail!("LISTINGS_PAGE_SIZE must be at least 1");
        }

        Ok(Self {
            source,
            page_size,
            remote: RemoteSettings {
                api_key: var("RAPIDAPI_KEY"),
                host: var("RAPIDAPI_HOST").unwrap_or(defaults.remote.host),
                base_url: var("LISTINGS_BASE_URL").unwrap_or(defaults.remote.base_url),
                timeout_secs: parse_or(&var, "LISTINGS_TIMEOUT_SECS", defaults.remote.timeout_secs)?,
            },
            adapter: AdapterSettings {
                usd_to_inr: parse_or(&var, "USD_TO_INR", defaults.adapter.usd_to_inr)?,
                market_adjustment: parse_or(
                    &var,
                    "MARKET_ADJUSTMENT",
                    defaults.adapter.market_adjustment,
                )?,
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
