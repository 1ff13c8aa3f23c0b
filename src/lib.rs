// Re-export modules
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod selectors;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::{FetchError, ScrapeError};
pub use fetchers::{FetchedPage, Fetcher, HttpFetcher};
pub use results::{
    DefaultExtraction, Extraction, Image, Link, PageResult, ScrapeResult, SelectorExtraction,
    SelectorValue,
};
pub use selectors::{SelectorMode, SelectorSpec};

/// Main builder for scraping a single page
#[derive(Debug, Clone, Default)]
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    /// Create a new Scraper with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, ScrapeError> {
        let config = ScraperConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ScrapeError> {
        let config = ScraperConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = timeout_seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the selector list; an empty list selects the default extraction
    pub fn with_selectors(mut self, selectors: SelectorSpec) -> Self {
        self.config.selectors = selectors;
        self
    }

    /// Add one named selector
    pub fn with_selector(mut self, name: impl Into<String>, css: impl Into<String>) -> Self {
        self.config.selectors.insert(name, css);
        self
    }

    /// Set how malformed selectors are handled
    pub fn with_selector_mode(mut self, mode: SelectorMode) -> Self {
        self.config.selector_mode = mode;
        self
    }

    /// Keep non-2xx responses instead of failing
    pub fn with_allow_error_status(mut self, allow: bool) -> Self {
        self.config.allow_error_status = allow;
        self
    }

    /// Collapse whitespace runs in extracted text
    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.config.collapse_whitespace = collapse;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Fetch the page over HTTP and extract its content
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        self.config.validate()?;
        let fetcher = HttpFetcher::from_config(&self.config)?;
        Self::run(&self.config, &fetcher, url).await
    }

    /// Scrape using a caller-supplied fetcher
    pub async fn scrape_with<F: Fetcher>(
        &self,
        fetcher: &F,
        url: &str,
    ) -> Result<ScrapeResult, ScrapeError> {
        Self::run(&self.config, fetcher, url).await
    }

    async fn run<F: Fetcher>(
        config: &ScraperConfig,
        fetcher: &F,
        url: &str,
    ) -> Result<ScrapeResult, ScrapeError> {
        let page_url = utils::validate_url(url)?;
        ::log::info!("Scraping {}", page_url);

        let fetched = fetcher.fetch(&page_url).await?;
        if !fetched.is_success() {
            if config.allow_error_status {
                ::log::warn!("Keeping response with status {}", fetched.status);
            } else {
                return Err(ScrapeError::HttpStatus {
                    status: fetched.status,
                    url: fetched.url.to_string(),
                });
            }
        }

        let document = parsers::parse_document(&fetched.body);
        let result = parsers::extract(
            &document,
            &page_url,
            fetched.status,
            &config.selectors,
            &config.extract_options(),
        )?;

        ::log::info!("Scraped {} ({})", result.page.url, result.page.title);
        Ok(result)
    }
}
