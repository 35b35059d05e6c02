//! Video Source Module
//!
//! The capability handlers use to search for videos and look one up by id,
//! with a live YouTube Data API implementation and an offline mock.
//!
//! # Variants
//! - [`YouTubeClient`]: calls the YouTube Data API, needs an API key
//! - [`MockVideoSource`]: fixed in-memory catalog with simulated latency
//!
//! [`select_source`] picks one at startup and the choice holds for the life
//! of the process.

mod mock;
mod youtube;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SourceResult;
use crate::models::{VideoDetail, VideoSummary};

pub use mock::{MockVideoSource, DEFAULT_DETAIL_LATENCY, DEFAULT_SEARCH_LATENCY};
pub use youtube::YouTubeClient;

// == Source Kind ==
/// Which implementation backs a [`VideoSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    Mock,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Live => "youtube",
            SourceKind::Mock => "mock",
        }
    }
}

// == Video Source Trait ==
/// Search and detail lookup over some catalog of videos.
///
/// Implementations normalize every failure into a
/// [`SourceError`](crate::error::SourceError) and never retry on their own.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Returns up to `max_results` videos matching `query`.
    async fn search_videos(&self, query: &str, max_results: u32)
        -> SourceResult<Vec<VideoSummary>>;

    /// Returns the video with the given id, with statistics.
    async fn get_video_details(&self, id: &str) -> SourceResult<VideoDetail>;

    /// Implementation backing this source, for health reporting.
    fn kind(&self) -> SourceKind;
}

// == Factory ==
/// Builds the live YouTube source, or the mock when no API key is configured.
///
/// With `validate_api_key` set, the live client is probed once. A failed
/// probe is only logged; the live source is kept.
pub async fn select_source(config: &Config) -> Arc<dyn VideoSource> {
    match YouTubeClient::from_config(config) {
        Ok(client) => {
            info!(base_url = %config.youtube_api_base_url, "Using YouTube Data API video source");
            if config.validate_api_key {
                if client.validate_api_key().await {
                    info!("YouTube API key is valid");
                } else {
                    warn!("YouTube API key check failed, searches may return errors");
                }
            }
            Arc::new(client)
        }
        Err(err) => {
            warn!(error = %err, "YouTube API unavailable, falling back to mock video source");
            info!("Set YOUTUBE_API_KEY in the environment or .env to use the real YouTube API");
            Arc::new(MockVideoSource::new().with_latency(config.mock_latency()))
        }
    }
}
