//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POMADE_API_BASE_URL` - Base URL of the marketplace REST backend
//!   (default: `http://localhost:5000/api/v1`)

use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client SDK configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace backend, including the API prefix.
    pub api_base_url: Url,
}

impl ClientConfig {
    /// Create a configuration pointing at an explicit backend URL.
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self { api_base_url }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `POMADE_API_BASE_URL` is set but not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw = get_env_or_default("POMADE_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("POMADE_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self { api_base_url })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
pub(crate) fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_url() {
        let url = Url::parse("https://api.pomade.example/api/v1").unwrap();
        let config = ClientConfig::new(url.clone());
        assert_eq!(config.api_base_url, url);
    }

    #[test]
    fn test_default_base_url_parses() {
        assert!(Url::parse(DEFAULT_API_BASE_URL).is_ok());
    }
}
