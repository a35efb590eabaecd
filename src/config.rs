//! Service configuration read from the environment (after `.env` is loaded)

use std::env;
use std::time::Duration;

use crate::models::language::{
    DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, LanguagePreference,
};

/// Environment variable for the database connection string
const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable for the listen address
const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Environment variables for the translation provider
const ENV_API_URL: &str = "TRANSLATION_API_URL";
const ENV_API_USERNAME: &str = "TRANSLATION_API_USERNAME";
const ENV_API_KEY: &str = "TRANSLATION_API_KEY";

/// Environment variables for the default language pair
const ENV_DEFAULT_SOURCE: &str = "DEFAULT_SOURCE_LANGUAGE";
const ENV_DEFAULT_TARGET: &str = "DEFAULT_TARGET_LANGUAGE";

/// Environment variable capping in-flight provider calls during reconciliation
const ENV_RECONCILE_CONCURRENCY: &str = "RECONCILE_MAX_CONCURRENCY";

/// Environment variable enabling the background reconciliation job
const ENV_RECONCILE_INTERVAL: &str = "RECONCILE_INTERVAL_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5500";
const DEFAULT_API_URL: &str = "https://sandbox.unbabel.com/tapi/v2/translation";
const DEFAULT_RECONCILE_CONCURRENCY: usize = 8;

/// Longest text accepted for translation, in characters
pub const MAX_TEXT_LENGTH: usize = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub api_url: String,
    pub api_username: String,
    pub api_key: String,
    pub default_languages: LanguagePreference,
    pub reconcile_max_concurrency: usize,
    /// `None` keeps reconciliation tied to listing requests only
    pub reconcile_interval: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes `std::env::var`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{} must be set", key).into())
        };

        let database_url = required(ENV_DATABASE_URL)?;
        let api_username = required(ENV_API_USERNAME)?;
        let api_key = required(ENV_API_KEY)?;

        let bind_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let api_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let source = lookup(ENV_DEFAULT_SOURCE).unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string());
        let target = lookup(ENV_DEFAULT_TARGET).unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
        let default_languages = LanguagePreference::from_codes(&source, &target)?;

        let reconcile_max_concurrency = lookup(ENV_RECONCILE_CONCURRENCY)
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_RECONCILE_CONCURRENCY);

        let reconcile_interval = lookup(ENV_RECONCILE_INTERVAL)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            database_url,
            bind_addr,
            api_url,
            api_username,
            api_key,
            default_languages,
            reconcile_max_concurrency,
            reconcile_interval,
        })
    }
}
