//! # Configuration Module
//!
//! This module defines configuration structures for the recipe provider, the
//! translation service and the search pipeline, and loads them from the
//! environment (a `.env` file is honored when present).

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::memo_cache::DEFAULT_CACHE_CAPACITY;

// Constants for pipeline configuration
pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CANDIDATE_CAP: usize = 200;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 10;
pub const DEFAULT_RESULT_LIMIT: usize = 10;
pub const DEFAULT_AREA_BROWSE_LIMIT: usize = 5;
pub const DEFAULT_PROVIDER_LANGUAGE: &str = "en";
pub const DEFAULT_USER_LANGUAGE: &str = "pt";

/// Recipe provider connection settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the TheMealDB-compatible API, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum memoized responses
    pub cache_capacity: usize,
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Translation service settings
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// Endpoint of a LibreTranslate-compatible service; `None` disables translation
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    /// Language the recipe provider speaks (e.g. "en")
    pub provider_language: String,
    /// Language the user reads and types (e.g. "pt")
    pub user_language: String,
    pub request_timeout_secs: u64,
    /// Maximum memoized translations
    pub cache_capacity: usize,
}

impl TranslationConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some() && self.provider_language != self.user_language
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            provider_language: DEFAULT_PROVIDER_LANGUAGE.to_string(),
            user_language: DEFAULT_USER_LANGUAGE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Search pipeline tuning
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upper bound on candidate identifiers sent to detail fetch
    pub candidate_cap: usize,
    /// Concurrent detail lookups
    pub fetch_concurrency: usize,
    /// Default number of results returned
    pub result_limit: usize,
    /// Number of recipes shown when browsing a cuisine
    pub area_browse_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            result_limit: DEFAULT_RESULT_LIMIT,
            area_browse_limit: DEFAULT_AREA_BROWSE_LIMIT,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub translation: TranslationConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one exists. Every variable is optional
    /// and falls back to the defaults above.
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric variable does not parse, or when a
    /// capacity, timeout or concurrency value is zero.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let provider = ProviderConfig {
            base_url: lookup("RECIPE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.provider.base_url),
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.provider.request_timeout_secs,
            )?,
            cache_capacity: parse_var(
                &lookup,
                "PROVIDER_CACHE_CAPACITY",
                defaults.provider.cache_capacity,
            )?,
        };

        let translation = TranslationConfig {
            api_url: lookup("TRANSLATION_API_URL").filter(|url| !url.trim().is_empty()),
            api_key: lookup("TRANSLATION_API_KEY").filter(|key| !key.trim().is_empty()),
            provider_language: lookup("PROVIDER_LANGUAGE")
                .unwrap_or(defaults.translation.provider_language),
            user_language: lookup("USER_LANGUAGE").unwrap_or(defaults.translation.user_language),
            request_timeout_secs: provider.request_timeout_secs,
            cache_capacity: parse_var(
                &lookup,
                "TRANSLATION_CACHE_CAPACITY",
                defaults.translation.cache_capacity,
            )?,
        };

        let search = SearchConfig {
            candidate_cap: parse_var(&lookup, "CANDIDATE_CAP", defaults.search.candidate_cap)?,
            fetch_concurrency: parse_var(
                &lookup,
                "FETCH_CONCURRENCY",
                defaults.search.fetch_concurrency,
            )?,
            result_limit: parse_var(&lookup, "RESULT_LIMIT", defaults.search.result_limit)?,
            area_browse_limit: defaults.search.area_browse_limit,
        };

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL").unwrap_or(defaults.logging.level),
            json: parse_var(&lookup, "LOG_JSON", defaults.logging.json)?,
        };

        let config = AppConfig {
            provider,
            translation,
            search,
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let non_zero = [
            ("REQUEST_TIMEOUT_SECS", self.provider.request_timeout_secs as usize),
            ("PROVIDER_CACHE_CAPACITY", self.provider.cache_capacity),
            ("TRANSLATION_CACHE_CAPACITY", self.translation.cache_capacity),
            ("CANDIDATE_CAP", self.search.candidate_cap),
            ("FETCH_CONCURRENCY", self.search.fetch_concurrency),
            ("RESULT_LIMIT", self.search.result_limit),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                bail!("{name} must be greater than zero");
            }
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
