//! Uniform connector layer over heterogeneous web-scraping backends.
//!
//! Callers pick a backend, hand its adapter a `(url, run_id)` pair, and get
//! back one normalized [`ScrapeOutcome`] no matter which backend serviced the
//! call or how it failed. Orchestration, persistence and credential sourcing
//! live outside this crate; it only consumes a [`Config`] and emits outcomes.

pub mod config;
pub mod domain;
pub mod error;

pub use config::Config;
pub use domain::models::{ContentFormat, ScrapeOutcome, ScraperKind};
pub use domain::scrapers::{DecodoScraper, RestScraper, Scraper, ScraperManager};
pub use error::{Result, ScrapeError};
