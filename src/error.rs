/// Transport-level failures while fetching a page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Classify a reqwest error into one of our transport kinds
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else if err.is_builder() {
            FetchError::Client(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Please enter a valid URL starting with http:// or https:// (got {0:?})")]
    InvalidUrl(String),

    #[error("Request error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Request error: HTTP {status} for url {url}")]
    HttpStatus { status: u16, url: String },

    #[error("invalid CSS selector {selector:?} for {name:?}: {reason}")]
    InvalidSelector {
        name: String,
        selector: String,
        reason: String,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
