pub mod decodo;
pub mod rest;

pub use decodo::DecodoScraper;
pub use rest::RestScraper;

use crate::config::Config;
use crate::domain::models::{ScrapeOutcome, ScraperKind};
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;

/// Capability contract every backend adapter implements.
///
/// `scrape` is total: for any input it resolves to one `ScrapeOutcome`,
/// bounded by the adapter's fixed timeout. No fault inside a call escapes as
/// an error value or panic; callers branch on the outcome's
/// `status_code`/`error` fields instead. Adapters hold only read-only
/// configuration, so one instance may serve concurrent calls without locking.
#[async_trait]
pub trait Scraper: Send + Sync + std::fmt::Debug {
    /// Fetch one URL through this backend. Exactly one network attempt.
    async fn scrape(&self, url: &str, run_id: &str) -> ScrapeOutcome;

    /// Readiness probe: is the backend configured well enough to attempt a
    /// scrape? Must not perform network I/O. Stateless backends are always
    /// ready.
    fn check_environment(&self) -> bool {
        true
    }

    /// The backend id stamped on every outcome this adapter emits.
    fn kind(&self) -> ScraperKind;
}

/// Factory for constructing adapters from shared configuration.
pub struct ScraperManager {
    config: Config,
}

impl ScraperManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Construct the adapter for the given backend id.
    ///
    /// Fails with a `Configuration` error for backends without an adapter or
    /// with missing credentials; this is the construction-time fatal path,
    /// raised before any scrape is attempted.
    pub fn get_scraper(&self, kind: ScraperKind) -> Result<Box<dyn Scraper>> {
        match kind {
            ScraperKind::DecodoApi => Ok(Box::new(DecodoScraper::new(&self.config)?)),
            ScraperKind::RestScraper => Ok(Box::new(RestScraper::new(&self.config))),
            other => Err(ScrapeError::Configuration(format!(
                "no adapter registered for backend '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_builds_registered_adapters() {
        let config = Config {
            decodo_auth_token: Some("token-123".to_string()),
            ..Config::default()
        };
        let manager = ScraperManager::new(config);

        let decodo = manager.get_scraper(ScraperKind::DecodoApi).unwrap();
        assert_eq!(decodo.kind(), ScraperKind::DecodoApi);
        assert!(decodo.check_environment());

        let rest = manager.get_scraper(ScraperKind::RestScraper).unwrap();
        assert_eq!(rest.kind(), ScraperKind::RestScraper);
        assert!(rest.check_environment());
    }

    #[test]
    fn test_manager_rejects_unregistered_backend() {
        let manager = ScraperManager::new(Config::default());
        let err = manager.get_scraper(ScraperKind::ZyteApi).unwrap_err();
        assert!(matches!(err, ScrapeError::Configuration(_)));
        assert!(err.to_string().contains("zyte_api"));
    }

    #[test]
    fn test_manager_rejects_missing_credential() {
        let manager = ScraperManager::new(Config::default());
        let err = manager.get_scraper(ScraperKind::DecodoApi).unwrap_err();
        assert!(matches!(err, ScrapeError::Configuration(_)));
    }
}
