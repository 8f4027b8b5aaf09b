use std::env;

/// Default request timeout budget, in seconds, per scrape call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Decodo Web Scraping API endpoint.
pub const DECODO_BASE_URL: &str = "https://scraper-api.decodo.com/v2/scrape";

/// Backend configuration loaded from environment variables.
///
/// The library only consumes this; discovering credentials (dotenv files,
/// secret stores) is the embedding application's job.
#[derive(Debug, Clone)]
pub struct Config {
    /// Decodo API auth token (DECODO_AUTH_TOKEN), required by the Decodo adapter
    pub decodo_auth_token: Option<String>,
    /// Decodo scrape endpoint override (DECODO_BASE_URL)
    pub decodo_base_url: String,
    /// Per-call request timeout in seconds (SCRAPE_TIMEOUT_SECS, default 180)
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            decodo_auth_token: env::var("DECODO_AUTH_TOKEN").ok(),
            decodo_base_url: env::var("DECODO_BASE_URL")
                .unwrap_or_else(|_| DECODO_BASE_URL.to_string()),
            timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decodo_auth_token: None,
            decodo_base_url: DECODO_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
