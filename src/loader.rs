//! Concurrent feed loading
//!
//! All five feeds are requested at once. The first failure, whether network,
//! HTTP status or unparsable body, aborts the whole load and whatever the other
//! requests produced is dropped.

use serde_json::Value;
use std::time::Instant;
use tracing::{error, info};

use crate::api::{Feed, FeedSource};
use crate::error::{FeedError, LoadFailure};
use crate::models::schema;
use crate::models::DashboardData;
use crate::storm::enrich_storm_distances;

/// Fetch and parse every feed, failing fast on the first error
pub async fn load_dashboard_data<S>(source: &S) -> Result<DashboardData, LoadFailure>
where
    S: FeedSource + ?Sized,
{
    info!("🚀 Loading {} feeds", Feed::ALL.len());
    let started = Instant::now();

    let result = futures::try_join!(
        load_feed(source, Feed::Districts, schema::parse_districts),
        load_feed(source, Feed::StormTrack, schema::parse_storm_track),
        load_feed(source, Feed::HealthFacilities, schema::parse_facilities),
        load_feed(source, Feed::EducationFacilities, schema::parse_facilities),
        load_feed(source, Feed::SummaryStats, schema::parse_summary),
    );

    let (mut districts, storm_track, health_facilities, education_facilities, summary) = match result {
        Ok(feeds) => feeds,
        Err(failure) => {
            error!("❌ Load aborted after {:?}: {}", started.elapsed(), failure);
            return Err(failure);
        }
    };

    let derived = enrich_storm_distances(&mut districts, &storm_track);
    if derived > 0 {
        info!("📏 Derived storm distance for {} districts", derived);
    }

    info!(
        "✅ Loaded {} districts, {} track points, {} health and {} education facilities in {:?}",
        districts.len(),
        storm_track.len(),
        health_facilities.len(),
        education_facilities.len(),
        started.elapsed()
    );

    Ok(DashboardData {
        districts,
        storm_track,
        health_facilities,
        education_facilities,
        summary,
    })
}

async fn load_feed<S, T>(
    source: &S,
    feed: Feed,
    parse: fn(Value) -> Result<T, FeedError>,
) -> Result<T, LoadFailure>
where
    S: FeedSource + ?Sized,
{
    let value = source
        .fetch(feed)
        .await
        .map_err(|e| LoadFailure::new(feed, e))?;
    parse(value).map_err(|e| LoadFailure::new(feed, e))
}
