//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_URL` - Base URL of the backend (e.g., `https://shop.example.com`)
//!
//! ## Optional
//! - `SHOPFRONT_TIMEOUT_SECS` - HTTP request timeout (default: 30)
//! - `SHOPFRONT_DATA_DIR` - Directory for persisted session and cart (default: `.shopfront`)
//! - `SHOPFRONT_CACHE_TTL_SECS` - Catalog cache time-to-live, 0 disables (default: 60)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_DATA_DIR: &str = ".shopfront";
const DEFAULT_CACHE_TTL_SECS: &str = "60";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths (`/api/...`) are joined onto it.
    pub api_url: Url,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
    /// Directory backing the file key-value store.
    pub data_dir: PathBuf,
    /// How long catalog responses stay cached. Zero disables caching.
    pub cache_ttl: Duration,
}

impl ClientConfig {
    /// Configuration for the given backend with default settings.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cache_ttl: Duration::from_secs(60),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SHOPFRONT_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPFRONT_API_URL".to_string()))?;
        let api_url = parse_api_url(&raw_url)?;

        let timeout = parse_secs(
            "SHOPFRONT_TIMEOUT_SECS",
            &lookup("SHOPFRONT_TIMEOUT_SECS").unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string()),
        )?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let data_dir = PathBuf::from(
            lookup("SHOPFRONT_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let cache_ttl = parse_secs(
            "SHOPFRONT_CACHE_TTL_SECS",
            &lookup("SHOPFRONT_CACHE_TTL_SECS")
                .unwrap_or_else(|| DEFAULT_CACHE_TTL_SECS.to_string()),
        )?;

        Ok(Self {
            api_url,
            timeout,
            data_dir,
            cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the backend URL, normalising it to end with a slash so that
/// `Url::join` keeps any path prefix.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ClientConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_missing_api_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SHOPFRONT_API_URL"));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SHOPFRONT_API_URL", "http://localhost:5000")]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.data_dir, PathBuf::from(".shopfront"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_path_prefix_is_kept() {
        let config = load(&[("SHOPFRONT_API_URL", "https://example.com/shop")]).unwrap();
        assert_eq!(
            config.api_url.join("api/products").unwrap().as_str(),
            "https://example.com/shop/api/products"
        );
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = load(&[("SHOPFRONT_API_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let err = load(&[
            ("SHOPFRONT_API_URL", "http://localhost"),
            ("SHOPFRONT_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPFRONT_TIMEOUT_SECS"));

        let err = load(&[
            ("SHOPFRONT_API_URL", "http://localhost"),
            ("SHOPFRONT_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPFRONT_API_URL", "http://localhost:5000/"),
            ("SHOPFRONT_TIMEOUT_SECS", "5"),
            ("SHOPFRONT_DATA_DIR", "/tmp/sf"),
            ("SHOPFRONT_CACHE_TTL_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/sf"));
        assert!(config.cache_ttl.is_zero());
    }
}
