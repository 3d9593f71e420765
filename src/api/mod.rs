use serde_json::Value;
use std::fmt;

use crate::error::FeedError;
use crate::models::Config;

pub mod feed_client;
pub use feed_client::HttpFeedClient;

/// The five resources the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Districts,
    StormTrack,
    HealthFacilities,
    EducationFacilities,
    SummaryStats,
}

impl Feed {
    pub const ALL: [Feed; 5] = [
        Feed::Districts,
        Feed::StormTrack,
        Feed::HealthFacilities,
        Feed::EducationFacilities,
        Feed::SummaryStats,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feed::Districts => "districts",
            Feed::StormTrack => "storm track",
            Feed::HealthFacilities => "health facilities",
            Feed::EducationFacilities => "education facilities",
            Feed::SummaryStats => "summary statistics",
        }
    }

    /// Path of this feed relative to the configured base URL
    pub fn endpoint(self, config: &Config) -> &str {
        match self {
            Feed::Districts => &config.districts_endpoint,
            Feed::StormTrack => &config.storm_track_endpoint,
            Feed::HealthFacilities => &config.health_facilities_endpoint,
            Feed::EducationFacilities => &config.education_facilities_endpoint,
            Feed::SummaryStats => &config.summary_stats_endpoint,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can hand back the raw JSON body of a feed
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, feed: Feed) -> Result<Value, FeedError>;
}
