//! Response DTOs for the search proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::{VideoDetail, VideoSummary};
use crate::source::SourceKind;

/// Response body for POST and GET /api/search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    /// The trimmed query that was searched
    pub query: String,
    pub total_results: usize,
    pub videos: Vec<VideoSummary>,
    /// Whether the results came from the search cache
    pub from_cache: bool,
    pub message: String,
}

impl SearchResponse {
    /// Creates a new SearchResponse
    pub fn new(query: impl Into<String>, videos: Vec<VideoSummary>, from_cache: bool) -> Self {
        let message = match (videos.len(), from_cache) {
            (0, _) => "No videos found. Try a different search term.".to_string(),
            (n, false) => format!("Found {} videos.", n),
            (n, true) => format!("Found {} videos. (cached)", n),
        };

        Self {
            success: true,
            query: query.into(),
            total_results: videos.len(),
            videos,
            from_cache,
            message,
        }
    }
}

/// Response body for GET /api/video/:id
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub success: bool,
    pub video: VideoDetail,
    pub message: String,
}

impl VideoResponse {
    /// Creates a new VideoResponse
    pub fn new(video: VideoDetail) -> Self {
        Self {
            success: true,
            video,
            message: "Video details retrieved successfully.".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// `connected` when backed by the live YouTube API
    pub youtube_service: String,
    /// Active video source, `youtube` or `mock`
    pub source: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(kind: SourceKind) -> Self {
        let youtube_service = match kind {
            SourceKind::Live => "connected",
            SourceKind::Mock => "disconnected",
        };

        Self {
            success: true,
            message: "YouTube Player API is running.".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            youtube_service: youtube_service.to_string(),
            source: kind.as_str().to_string(),
        }
    }
}
