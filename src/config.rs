//! Runtime configuration
//!
//! Read once at startup from environment variables.

use std::path::PathBuf;

pub const ENV_CATALOG_PATH: &str = "PAWPAL_CATALOG_PATH";
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_ADVICE_MODEL: &str = "PAWPAL_ADVICE_MODEL";
pub const ENV_LOG: &str = "PAWPAL_LOG";

pub const DEFAULT_LOG_FILTER: &str = "pawpal=info";

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    pub openrouter_api_key: Option<String>,
    pub advice_model: Option<String>,
    /// tracing filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            openrouter_api_key: None,
            advice_model: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            catalog_path: get(ENV_CATALOG_PATH).map(PathBuf::from),
            openrouter_api_key: get(ENV_API_KEY),
            advice_model: get(ENV_ADVICE_MODEL),
            log_filter: get(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Human-readable catalog source for status output
    pub fn catalog_source(&self) -> String {
        match &self.catalog_path {
            Some(path) => path.display().to_string(),
            None => "builtin".to_string(),
        }
    }
}
