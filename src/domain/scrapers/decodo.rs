use crate::config::Config;
use crate::domain::extract::extract_content;
use crate::domain::models::{ContentFormat, ScrapeOutcome, ScraperKind};
use crate::domain::scrapers::Scraper;
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Adapter for the Decodo Web Scraping API.
///
/// Requires a `DECODO_AUTH_TOKEN` credential in the configuration; missing
/// credentials fail construction, not the individual calls.
#[derive(Debug)]
pub struct DecodoScraper {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
    timeout_secs: u64,
}

impl DecodoScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let token = config
            .decodo_auth_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ScrapeError::Configuration("DECODO_AUTH_TOKEN environment variable not set".into())
            })?;

        // Normalize the auth scheme once, not per call.
        let auth_header = if token.starts_with("Basic ") {
            token.to_string()
        } else {
            format!("Basic {}", token)
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScrapeError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.decodo_base_url.clone(),
            auth_header,
            timeout_secs: config.timeout_secs,
        })
    }

    /// One network attempt. Transport faults come back already classified.
    async fn send_request(&self, url: &str) -> std::result::Result<reqwest::Response, ScrapeError> {
        let payload = serde_json::json!({
            "url": url,
            "markdown": true,
        });

        self.client
            .post(&self.base_url)
            .header("Accept", "application/json")
            .header("Authorization", &self.auth_header)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ScrapeError::classify_reqwest(e, self.timeout_secs))
    }
}

#[async_trait]
impl Scraper for DecodoScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::DecodoApi
    }

    fn check_environment(&self) -> bool {
        !self.auth_header.is_empty()
    }

    async fn scrape(&self, url: &str, run_id: &str) -> ScrapeOutcome {
        debug!(url, run_id, "Scraping via Decodo API");

        let resp = match self.send_request(url).await {
            Ok(resp) => resp,
            Err(fault) => {
                warn!(url, run_id, %fault, "Decodo request failed");
                return ScrapeOutcome::failure(
                    self.kind(),
                    run_id,
                    url,
                    &fault,
                    None,
                    ContentFormat::Markdown,
                );
            }
        };

        let status = resp.status();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                let fault = ScrapeError::classify_reqwest(e, self.timeout_secs);
                warn!(url, run_id, %fault, "Failed to read Decodo response body");
                return ScrapeOutcome::failure(
                    self.kind(),
                    run_id,
                    url,
                    &fault,
                    None,
                    ContentFormat::Markdown,
                );
            }
        };

        if !status.is_success() {
            let fault = ScrapeError::Backend {
                status: status.as_u16(),
                body,
            };
            warn!(url, run_id, status = status.as_u16(), "Decodo returned error status");
            return ScrapeOutcome::failure(
                self.kind(),
                run_id,
                url,
                &fault,
                None,
                ContentFormat::Markdown,
            );
        }

        // Success status: decide which part of the response counts as content.
        let content = if is_json {
            match serde_json::from_str::<Value>(&body) {
                Ok(data) => extract_content(&data).unwrap_or_else(|| body.clone()),
                Err(e) => {
                    // Body contradicted its declared content type; surface the
                    // parse fault but still offer the raw text as content.
                    let fault = ScrapeError::Parse(e.to_string());
                    warn!(url, run_id, %fault, "Unparseable Decodo response");
                    return ScrapeOutcome::failure(
                        self.kind(),
                        run_id,
                        url,
                        &fault,
                        Some(body),
                        ContentFormat::Markdown,
                    );
                }
            }
        } else {
            body
        };

        debug!(url, run_id, bytes = content.len(), "Decodo scrape complete");
        ScrapeOutcome::success(
            self.kind(),
            run_id,
            url,
            status.as_u16(),
            Some(content),
            ContentFormat::Markdown,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_config(base_url: &str, timeout_secs: u64) -> Config {
        Config {
            decodo_auth_token: Some("test-token".to_string()),
            decodo_base_url: base_url.to_string(),
            timeout_secs,
        }
    }

    /// Serve one canned HTTP response on a local port, then close.
    async fn canned_server(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        )
    }

    #[test]
    fn test_missing_token_is_a_construction_error() {
        let err = DecodoScraper::new(&Config::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::Configuration(_)));
        assert!(err.to_string().contains("DECODO_AUTH_TOKEN"));
    }

    #[test]
    fn test_blank_token_is_a_construction_error() {
        let config = Config {
            decodo_auth_token: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(DecodoScraper::new(&config).is_err());
    }

    #[test]
    fn test_auth_scheme_prefix_is_normalized_once() {
        let bare = DecodoScraper::new(&test_config("http://localhost", 180)).unwrap();
        assert_eq!(bare.auth_header, "Basic test-token");

        let config = Config {
            decodo_auth_token: Some("Basic already-prefixed".to_string()),
            ..Config::default()
        };
        let prefixed = DecodoScraper::new(&config).unwrap();
        assert_eq!(prefixed.auth_header, "Basic already-prefixed");
    }

    #[test]
    fn test_check_environment_without_network() {
        let scraper = DecodoScraper::new(&test_config("http://localhost", 180)).unwrap();
        assert!(scraper.check_environment());
        assert_eq!(scraper.kind(), ScraperKind::DecodoApi);
    }

    #[tokio::test]
    async fn test_scrape_extracts_from_results_array() {
        let body = r##"{"results": [{"content": "# Page\n\ntext", "markdown": "ignored"}]}"##;
        let base = canned_server(http_response("200 OK", "application/json", body)).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-1").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.scraper, ScraperKind::DecodoApi);
        assert_eq!(outcome.run_id, "run-1");
        assert_eq!(outcome.url, "https://example.com");
        assert_eq!(outcome.status_code, 200);
        assert_eq!(outcome.content.as_deref(), Some("# Page\n\ntext"));
        assert_eq!(outcome.content_size, "# Page\n\ntext".len());
        assert_eq!(outcome.format, ContentFormat::Markdown);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_scrape_json_without_known_fields_keeps_raw_body() {
        let body = r#"{"status": "done"}"#;
        let base = canned_server(http_response("200 OK", "application/json", body)).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-2").await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.content.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_scrape_non_json_response_is_raw_content() {
        let body = "<html><body>plain page</body></html>";
        let base = canned_server(http_response("200 OK", "text/html", body)).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-3").await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.status_code, 200);
        assert_eq!(outcome.content.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_scrape_malformed_json_reports_parse_fault_with_raw_fallback() {
        let body = "not json at all";
        let base = canned_server(http_response("200 OK", "application/json", body)).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-4").await;
        assert_eq!(outcome.status_code, 200);
        assert!(outcome
            .error
            .as_deref()
            .unwrap()
            .starts_with("Failed to parse response"));
        assert_eq!(outcome.content.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_scrape_backend_error_surfaces_status_and_body() {
        let body = r#"{"message": "invalid token"}"#;
        let base = canned_server(http_response("401 Unauthorized", "application/json", body)).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-5").await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.status_code, 401);
        assert_eq!(outcome.error.as_deref(), Some(body));
        assert!(outcome.content.is_none());
    }

    #[tokio::test]
    async fn test_scrape_empty_success_body_is_silent_empty_success() {
        let base = canned_server(http_response("200 OK", "text/html", "")).await;
        let scraper = DecodoScraper::new(&test_config(&base, 5)).unwrap();

        let outcome = scraper.scrape("https://example.com", "run-6").await;
        assert_eq!(outcome.status_code, 200);
        assert!(outcome.error.is_none());
        assert!(outcome.content.is_none());
        assert_eq!(outcome.content_size, 0);
    }

    #[tokio::test]
    async fn test_scrape_timeout_yields_408() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;
                // Never answer within the budget
                tokio::time::sleep(Duration::from_secs(10)).await;
            }
        });

        let scraper = DecodoScraper::new(&test_config(&format!("http://{}", addr), 1)).unwrap();
        let outcome = scraper.scrape("https://slow.example.com", "run-7").await;
        assert_eq!(outcome.status_code, 408);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Timeout: Request took longer than 1 seconds")
        );
        assert!(outcome.content.is_none());
    }

    #[tokio::test]
    async fn test_scrape_connection_refused_yields_503() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let scraper = DecodoScraper::new(&test_config(&format!("http://{}", addr), 5)).unwrap();
        let outcome = scraper.scrape("https://example.com", "run-8").await;
        assert_eq!(outcome.status_code, 503);
        assert!(outcome.error.as_deref().unwrap().starts_with("RequestError: "));
        assert!(outcome.content.is_none());
    }
}
