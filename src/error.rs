use thiserror::Error;

use crate::api::Feed;

/// Message shown in place of the loading indicator when any feed fails
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

/// Why a single feed could not be read
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("unparsable content: {0}")]
    Parse(String),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The one error the dashboard surfaces: some feed failed, nothing is rendered
#[derive(Error, Debug)]
#[error("failed to load {feed} feed: {source}")]
pub struct LoadFailure {
    pub feed: Feed,
    #[source]
    pub source: FeedError,
}

impl LoadFailure {
    pub fn new(feed: Feed, source: FeedError) -> Self {
        Self { feed, source }
    }

    /// Network, status and parse failures all collapse to the same text
    pub fn user_message(&self) -> &'static str {
        LOAD_ERROR_MESSAGE
    }
}
