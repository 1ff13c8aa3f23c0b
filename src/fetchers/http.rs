use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::fetchers::fetcher::{FetchedPage, Fetcher};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Fetcher backed by a reqwest client with a fixed user agent and timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Builds a fetcher that sends `user_agent` and gives up after `timeout`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        Self::from_builder(client_builder(user_agent, timeout), timeout)
    }

    fn from_builder(builder: ClientBuilder, timeout: Duration) -> Result<Self, FetchError> {
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, FetchError> {
        Self::new(&config.user_agent, config.timeout())
    }
}

fn client_builder(user_agent: &str, timeout: Duration) -> ClientBuilder {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        // One exchange per scrape; nothing is kept idle afterwards.
        .pool_max_idle_per_host(0)
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let started = std::time::Instant::now();
        ::log::info!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        if final_url != *url {
            ::log::debug!("Redirected to {}", final_url);
        }

        // Falls back to UTF-8 when Content-Type names no charset
        let body = response
            .text_with_charset("utf-8")
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_secs))?;

        ::log::info!(
            "Received {} bytes with status {} in {:.2} seconds",
            body.len(),
            status,
            started.elapsed().as_secs_f64()
        );

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}
