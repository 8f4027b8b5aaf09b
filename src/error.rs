use thiserror::Error;

/// Result alias for fallible construction paths (adapter and factory
/// constructors). Per-call scrape faults never surface through this type;
/// they are folded into a `ScrapeOutcome`.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Error taxonomy for the connector layer.
///
/// `Configuration` is the only variant allowed to escape as an error value:
/// it is raised at construction time, before any scrape is attempted. The
/// remaining variants are call-time faults that every adapter converts into
/// the `error`/`status_code` fields of its `ScrapeOutcome`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or unusable backend configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request exceeded the fixed timeout budget
    #[error("Timeout: Request took longer than {secs} seconds")]
    Timeout { secs: u64 },

    /// Transport-level fault: DNS, connection refused, reset
    #[error("RequestError: {0}")]
    Request(String),

    /// Backend answered with a non-success status
    #[error("{}", backend_message(.status, .body))]
    Backend { status: u16, body: String },

    /// Success-status response whose body did not match the declared content type
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Any other fault (programming error, unexpected response shape)
    #[error("{kind}: {detail}")]
    Unexpected { kind: String, detail: String },
}

fn backend_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("Backend returned status {}", status)
    } else {
        body.to_string()
    }
}

impl ScrapeError {
    /// Normalized HTTP-style status code for this fault. Never unset: faults
    /// that occur before a real HTTP response is known default to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ScrapeError::Configuration(_) => 500,
            ScrapeError::Timeout { .. } => 408,
            ScrapeError::Request(_) => 503,
            ScrapeError::Backend { status, .. } => *status,
            // The backend said success; the parse fault keeps that status.
            ScrapeError::Parse(_) => 200,
            ScrapeError::Unexpected { .. } => 500,
        }
    }

    /// Classify a transport-layer error from the HTTP client against the
    /// adapter's timeout budget.
    pub fn classify_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout { secs: timeout_secs }
        } else if err.is_connect() || err.is_request() || err.is_redirect() {
            ScrapeError::Request(err.to_string())
        } else {
            ScrapeError::Unexpected {
                kind: "RequestError".to_string(),
                detail: err.to_string(),
            }
        }
    }
}
