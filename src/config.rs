//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the YouTube Data API
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

// == Environment ==
/// Deployment mode, controls verbose errors and debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Parses `development`/`dev` (any case) as development, anything else
    /// as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// YouTube Data API key; absent means the mock source is used
    pub youtube_api_key: Option<String>,
    /// Base URL for YouTube Data API calls
    pub youtube_api_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Deployment mode
    pub environment: Environment,
    /// Default TTL in seconds for cached search results
    pub search_cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Directory holding the browser UI
    pub static_dir: PathBuf,
    /// Artificial latency of mock searches in milliseconds
    pub mock_latency_ms: u64,
    /// Probe the API key with a real call at startup
    pub validate_api_key: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `YOUTUBE_API_KEY` - YouTube Data API key (default: unset, mock source)
    /// - `YOUTUBE_API_BASE_URL` - API base URL (default: googleapis v3)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `APP_ENV` - `development` or `production` (default: production)
    /// - `SEARCH_CACHE_TTL` - Search cache TTL in seconds (default: 300)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 5)
    /// - `STATIC_DIR` - Browser UI directory (default: public)
    /// - `MOCK_LATENCY_MS` - Mock search latency (default: 500)
    /// - `VALIDATE_API_KEY` - Probe the key at startup (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            youtube_api_base_url: env::var("YOUTUBE_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.youtube_api_base_url),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(defaults.environment),
            search_cache_ttl: parse_var("SEARCH_CACHE_TTL").unwrap_or(defaults.search_cache_ttl),
            cleanup_interval: parse_var("CACHE_CLEANUP_INTERVAL")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.cleanup_interval),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.upstream_timeout),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            mock_latency_ms: parse_var("MOCK_LATENCY_MS").unwrap_or(defaults.mock_latency_ms),
            validate_api_key: parse_var("VALIDATE_API_KEY").unwrap_or(defaults.validate_api_key),
        }
    }

    pub fn search_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.search_cache_ttl)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            youtube_api_base_url: DEFAULT_YOUTUBE_API_BASE_URL.to_string(),
            server_port: 3000,
            environment: Environment::Production,
            search_cache_ttl: 300,
            cleanup_interval: 60,
            upstream_timeout: 5,
            static_dir: PathBuf::from("public"),
            mock_latency_ms: 500,
            validate_api_key: false,
        }
    }
}
