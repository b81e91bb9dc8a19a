use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::FeedError;

/// Fetches the configured feed with a bounded-time GET. One attempt per
/// call; failures surface directly to the caller.
pub struct Fetcher {
    client: Client,
    feed_url: String,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/rss+xml, application/xml, text/xml"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("RSS-Reader/1.0")
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            feed_url: config.feed_url.clone(),
            timeout,
        }
    }

    /// GET the feed URL and return the raw response body on a 2xx status.
    pub async fn fetch_feed(&self) -> Result<String, FeedError> {
        info!("Fetching feed: {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        debug!("Feed responded with status {}", status);

        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout(self.timeout)
        } else {
            FeedError::Network(err)
        }
    }
}
