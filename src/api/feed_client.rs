use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

use super::{Feed, FeedSource};
use crate::error::FeedError;
use crate::models::Config;

/// Reads the dashboard feeds over HTTP
pub struct HttpFeedClient {
    client: Client,
    config: Config,
}

impl HttpFeedClient {
    /// Create a new feed client
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent("storm-risk-dashboard/0.1")
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Absolute URL of a feed
    pub fn feed_url(&self, feed: Feed) -> Result<Url, FeedError> {
        Ok(self.config.base_url.join(feed.endpoint(&self.config))?)
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch(&self, feed: Feed) -> Result<Value, FeedError> {
        let url = self.feed_url(feed)?;
        let started = Instant::now();
        debug!("GET {} ({})", url, feed);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} responded with {}", url, status);
            return Err(FeedError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| FeedError::Parse(e.to_string()))?;
        debug!("Fetched {} ({} bytes) in {:?}", feed, body.len(), started.elapsed());
        Ok(value)
    }
}
