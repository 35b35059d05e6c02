//! Offline video source
//!
//! Serves a small fixed catalog so the server is usable without an API key.

use std::time::Duration;

use async_trait::async_trait;

use super::{SourceKind, VideoSource};
use crate::error::{SourceError, SourceResult};
use crate::models::{VideoDetail, VideoSummary};

/// Simulated network latency of a search
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(500);

/// Simulated network latency of a detail lookup
pub const DEFAULT_DETAIL_LATENCY: Duration = Duration::from_millis(300);

/// Duration reported for every mock video
const MOCK_DURATION: &str = "PT3M33S";

/// (id, title, channel, published)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    (
        "dQw4w9WgXcQ",
        "Rick Astley - Never Gonna Give You Up (Official Video)",
        "Rick Astley",
        "2009-10-25T06:57:33Z",
    ),
    (
        "jNQXAC9IVRw",
        "Me at the zoo",
        "jawed",
        "2005-04-23T20:33:31Z",
    ),
    (
        "kJQP7kiw5Fk",
        "Luis Fonsi - Despacito ft. Daddy Yankee",
        "Luis Fonsi",
        "2017-01-13T04:00:00Z",
    ),
    (
        "9bZkp7q19f0",
        "PSY - GANGNAM STYLE (강남스타일) M/V",
        "officialpsy",
        "2012-07-15T07:00:00Z",
    ),
    (
        "YQHsXMglC9A",
        "Adele - Hello",
        "Adele",
        "2015-10-23T07:00:00Z",
    ),
    (
        "JGwWNGJdvx8",
        "Ed Sheeran - Shape of You [Official Video]",
        "Ed Sheeran",
        "2017-01-30T14:00:00Z",
    ),
];

/// In-memory [`VideoSource`] used when no API key is configured
#[derive(Debug, Clone)]
pub struct MockVideoSource {
    videos: Vec<VideoSummary>,
    search_latency: Duration,
    detail_latency: Duration,
}

impl Default for MockVideoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVideoSource {
    /// Create a mock with the built-in catalog and default latencies
    pub fn new() -> Self {
        let videos = CATALOG
            .iter()
            .map(|(id, title, channel, published)| VideoSummary {
                id: id.to_string(),
                title: title.to_string(),
                description: match *id {
                    "dQw4w9WgXcQ" => {
                        "The official video for \"Never Gonna Give You Up\" by Rick Astley"
                            .to_string()
                    }
                    "jNQXAC9IVRw" => "The first video ever uploaded to YouTube".to_string(),
                    _ => title.to_string(),
                },
                thumbnail: format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id),
                channel_title: channel.to_string(),
                published_at: published.to_string(),
            })
            .collect();

        Self {
            videos,
            search_latency: DEFAULT_SEARCH_LATENCY,
            detail_latency: DEFAULT_DETAIL_LATENCY,
        }
    }

    /// Set the search latency; detail lookups take three fifths of it
    pub fn with_latency(mut self, search_latency: Duration) -> Self {
        self.search_latency = search_latency;
        self.detail_latency = search_latency * 3 / 5;
        self
    }

    /// The full catalog
    pub fn videos(&self) -> &[VideoSummary] {
        &self.videos
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// FNV-1a over the id, so statistics are stable per video
fn stats_seed(id: &str) -> u64 {
    id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> SourceResult<Vec<VideoSummary>> {
        simulate_latency(self.search_latency).await;

        let needle = query.to_lowercase();
        let matches: Vec<&VideoSummary> = self
            .videos
            .iter()
            .filter(|v| {
                v.title.to_lowercase().contains(&needle)
                    || v.channel_title.to_lowercase().contains(&needle)
            })
            .collect();

        let results = if matches.is_empty() {
            self.videos.iter().collect()
        } else {
            matches
        };

        Ok(results
            .into_iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    async fn get_video_details(&self, id: &str) -> SourceResult<VideoDetail> {
        simulate_latency(self.detail_latency).await;

        let summary = self
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;

        let mut rng = fastrand::Rng::with_seed(stats_seed(id));
        Ok(VideoDetail {
            summary,
            view_count: Some(rng.u64(..1_000_000_000).to_string()),
            like_count: Some(rng.u64(..10_000_000).to_string()),
            duration: Some(MOCK_DURATION.to_string()),
        })
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }
}
