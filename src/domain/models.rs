use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Known scraping backends.
///
/// Every id is part of the wire schema whether or not an adapter exists for
/// it yet; downstream consumers key on these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScraperKind {
    ApifyApi,
    Crawl4aiScraper,
    DecodoApi,
    FirecrawlApi,
    ExaApi,
    PlaywrightScraper,
    PuppeteerScraper,
    RestScraper,
    ScraperapiApi,
    ScrapingbeeApi,
    ScrapyScraper,
    SeleniumScraper,
    TavilyApi,
    ZyteApi,
}

impl std::fmt::Display for ScraperKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScraperKind::ApifyApi => write!(f, "apify_api"),
            ScraperKind::Crawl4aiScraper => write!(f, "crawl4ai_scraper"),
            ScraperKind::DecodoApi => write!(f, "decodo_api"),
            ScraperKind::FirecrawlApi => write!(f, "firecrawl_api"),
            ScraperKind::ExaApi => write!(f, "exa_api"),
            ScraperKind::PlaywrightScraper => write!(f, "playwright_scraper"),
            ScraperKind::PuppeteerScraper => write!(f, "puppeteer_scraper"),
            ScraperKind::RestScraper => write!(f, "rest_scraper"),
            ScraperKind::ScraperapiApi => write!(f, "scraperapi_api"),
            ScraperKind::ScrapingbeeApi => write!(f, "scrapingbee_api"),
            ScraperKind::ScrapyScraper => write!(f, "scrapy_scraper"),
            ScraperKind::SeleniumScraper => write!(f, "selenium_scraper"),
            ScraperKind::TavilyApi => write!(f, "tavily_api"),
            ScraperKind::ZyteApi => write!(f, "zyte_api"),
        }
    }
}

/// How the `content` field of an outcome should be interpreted.
/// Fixed per adapter, never inferred from the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    Markdown,
    Text,
    Html,
}

/// Normalized result of one scrape call, from any backend.
///
/// This is the sole artifact crossing the boundary to downstream consumers;
/// field names and optionality are a stable wire contract. A failed scrape
/// has the same shape as a successful one, differing only in which optional
/// fields are populated, so downstream code needs exactly one handling path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeOutcome {
    pub scraper: ScraperKind,
    pub run_id: String,
    pub url: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub content_size: usize,
    pub format: ContentFormat,
    pub created_at: DateTime<Utc>,
}

impl ScrapeOutcome {
    /// Outcome for a success-status response. An empty extraction is recorded
    /// as a silent empty success: content stays unset, content_size is 0 and
    /// no error is synthesized (downstream treats content_size == 0 as
    /// failure-equivalent).
    pub fn success(
        scraper: ScraperKind,
        run_id: &str,
        url: &str,
        status_code: u16,
        content: Option<String>,
        format: ContentFormat,
    ) -> Self {
        let content = content.filter(|c| !c.is_empty());
        let content_size = content.as_deref().map(str::len).unwrap_or(0);
        Self {
            scraper,
            run_id: run_id.to_string(),
            url: url.to_string(),
            status_code,
            error: None,
            content,
            content_size,
            format,
            created_at: Utc::now(),
        }
    }

    /// Outcome for a call-time fault, classified into status code and error
    /// string. `content` carries the raw-text fallback on parse faults and is
    /// None everywhere else.
    pub fn failure(
        scraper: ScraperKind,
        run_id: &str,
        url: &str,
        fault: &ScrapeError,
        content: Option<String>,
        format: ContentFormat,
    ) -> Self {
        let content = content.filter(|c| !c.is_empty());
        let content_size = content.as_deref().map(str::len).unwrap_or(0);
        Self {
            scraper,
            run_id: run_id.to_string(),
            url: url.to_string(),
            status_code: fault.status_code(),
            error: Some(fault.to_string()),
            content,
            content_size,
            format,
            created_at: Utc::now(),
        }
    }

    /// True when the outcome carries usable content.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status_code) && self.content.is_some()
    }
}
