//! Video records returned by search and detail lookups

use serde::{Deserialize, Serialize};

/// A single search hit, trimmed to what the UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Thumbnail URL, medium resolution when available
    pub thumbnail: String,
    pub channel_title: String,
    /// Upload time as reported upstream (RFC 3339)
    pub published_at: String,
}

/// A video with its statistics, returned by detail lookup
///
/// Statistics stay strings because the upstream API reports them that way
/// and omits them when the owner hides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(flatten)]
    pub summary: VideoSummary,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    /// ISO 8601 duration, e.g. `PT3M33S`
    pub duration: Option<String>,
}
