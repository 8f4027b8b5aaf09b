use crate::config::Config;
use crate::domain::models::{ContentFormat, ScrapeOutcome, ScraperKind};
use crate::domain::scrapers::Scraper;
use crate::error::ScrapeError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Credential-free adapter: a plain HTTP GET of the target URL. The response
/// body is the content, interpreted as HTML.
#[derive(Debug)]
pub struct RestScraper {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl RestScraper {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl Scraper for RestScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::RestScraper
    }

    async fn scrape(&self, url: &str, run_id: &str) -> ScrapeOutcome {
        debug!(url, run_id, "Fetching via plain HTTP GET");

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let fault = ScrapeError::classify_reqwest(e, self.timeout_secs);
                warn!(url, run_id, %fault, "GET request failed");
                return ScrapeOutcome::failure(
                    self.kind(),
                    run_id,
                    url,
                    &fault,
                    None,
                    ContentFormat::Html,
                );
            }
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                let fault = ScrapeError::classify_reqwest(e, self.timeout_secs);
                warn!(url, run_id, %fault, "Failed to read response body");
                return ScrapeOutcome::failure(
                    self.kind(),
                    run_id,
                    url,
                    &fault,
                    None,
                    ContentFormat::Html,
                );
            }
        };

        if !status.is_success() {
            let fault = ScrapeError::Backend {
                status: status.as_u16(),
                body,
            };
            warn!(url, run_id, status = status.as_u16(), "GET returned error status");
            return ScrapeOutcome::failure(
                self.kind(),
                run_id,
                url,
                &fault,
                None,
                ContentFormat::Html,
            );
        }

        debug!(url, run_id, bytes = body.len(), "Fetch complete");
        ScrapeOutcome::success(
            self.kind(),
            run_id,
            url,
            status.as_u16(),
            Some(body),
            ContentFormat::Html,
        )
    }
}
