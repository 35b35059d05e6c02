//! YouTube Data API client
//!
//! Live [`VideoSource`] backed by the `search` and `videos` endpoints of the
//! YouTube Data API v3.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error};

use super::{SourceKind, VideoSource};
use crate::config::Config;
use crate::error::{SourceError, SourceResult};
use crate::models::{VideoDetail, VideoSummary};

/// Error reasons the API uses for quota and rate limiting
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Client for the YouTube Data API
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Create a client for the API at `base_url`.
    ///
    /// Fails with [`SourceError::Configuration`] when `api_key` is blank.
    /// Every request is abandoned after `timeout`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> SourceResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(SourceError::Configuration(
                "YOUTUBE_API_KEY is not set".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SourceError::Configuration(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> SourceResult<Self> {
        Self::new(
            config.youtube_api_key.clone().unwrap_or_default(),
            config.youtube_api_base_url.clone(),
            config.upstream_timeout(),
        )
    }

    /// Checks the API key by running a one-result search.
    pub async fn validate_api_key(&self) -> bool {
        self.search_videos("test", 1).await.is_ok()
    }

    /// GET `{base_url}/{path}` with `params` and the API key, decoded as `T`.
    async fn fetch<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> SourceResult<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(path, error = %e.without_url(), "Could not read YouTube error body");
                String::new()
            });
            let err = classify_status(status, &body);
            error!(path, status = status.as_u16(), error = %err, "YouTube API request failed");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            SourceError::Unavailable(format!("undecodable response: {}", e.without_url()))
        })
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> SourceResult<Vec<VideoSummary>> {
        let params = [
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("maxResults", max_results.to_string()),
            ("order", "relevance".to_string()),
        ];

        let response: SearchListResponse = self.fetch("search", &params).await?;
        let videos: Vec<VideoSummary> = response
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(SearchItem::into_summary)
            .collect();

        debug!(query, count = videos.len(), "YouTube search returned");
        Ok(videos)
    }

    async fn get_video_details(&self, id: &str) -> SourceResult<VideoDetail> {
        let params = [
            ("part", "snippet,statistics,contentDetails".to_string()),
            ("id", id.to_string()),
        ];

        let response: VideoListResponse = self.fetch("videos", &params).await?;
        response
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(VideoItem::into_detail)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Live
    }
}

// == Error Mapping ==

/// Maps a failed send (connect error, timeout, ...) to `Unavailable`.
fn transport_error(err: reqwest::Error) -> SourceError {
    // The URL carries the API key
    let err = err.without_url();
    if err.is_timeout() {
        SourceError::Unavailable("request timed out".to_string())
    } else {
        SourceError::Unavailable(err.to_string())
    }
}

/// Maps a non-success upstream status to a caller-facing error kind.
fn classify_status(status: StatusCode, body: &str) -> SourceError {
    let api_error = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error);
    let reason = api_error
        .as_ref()
        .and_then(|e| e.errors.iter().find_map(|d| d.reason.clone()));
    let detail = api_error
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {}", status));

    match status {
        StatusCode::TOO_MANY_REQUESTS => SourceError::QuotaExceeded(detail),
        StatusCode::FORBIDDEN => match reason.as_deref() {
            Some(reason) if !QUOTA_REASONS.contains(&reason) => {
                SourceError::InvalidRequest(detail)
            }
            _ => SourceError::QuotaExceeded(detail),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => SourceError::InvalidRequest(detail),
        _ => SourceError::Unavailable(detail),
    }
}

// == Wire Types ==

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

impl SearchItem {
    /// Channel and playlist hits carry no video id and are skipped.
    fn into_summary(self) -> Option<VideoSummary> {
        let id = self.id.video_id?;
        Some(self.snippet.into_summary(id))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    description: String,
    thumbnails: Thumbnails,
    channel_title: String,
    published_at: String,
}

impl Snippet {
    fn into_summary(self, id: String) -> VideoSummary {
        VideoSummary {
            id,
            thumbnail: self.thumbnails.best_url(),
            title: self.title,
            description: self.description,
            channel_title: self.channel_title,
            published_at: self.published_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium resolution, else default, else empty.
    fn best_url(self) -> String {
        self.medium
            .or(self.default)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Option<Vec<VideoItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    statistics: Option<Statistics>,
    content_details: Option<ContentDetails>,
}

impl VideoItem {
    fn into_detail(self) -> VideoDetail {
        let statistics = self.statistics.unwrap_or_default();
        VideoDetail {
            summary: self.snippet.into_summary(self.id),
            view_count: statistics.view_count,
            like_count: statistics.like_count,
            duration: self.content_details.and_then(|c| c.duration),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_requires_api_key() {
        let err = YouTubeClient::new("", "http://localhost", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SourceError::Configuration(_)));

        let err = YouTubeClient::new("  ", "http://localhost", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SourceError::Configuration(_)));
    }

    #[test]
    fn test_new_trims_base_url() {
        let client = YouTubeClient::new("key", "http://localhost/v3/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost/v3");
        assert_eq!(client.kind(), SourceKind::Live);
    }

    #[test]
    fn test_from_config_without_key() {
        let err = YouTubeClient::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, SourceError::Configuration(_)));
    }

    fn api_error(code: u16, reason: Option<&str>) -> String {
        let errors = match reason {
            Some(reason) => json!([{ "reason": reason }]),
            None => json!([]),
        };
        json!({ "error": { "code": code, "message": "upstream says no", "errors": errors } })
            .to_string()
    }

    #[test]
    fn test_classify_quota() {
        let err = classify_status(StatusCode::FORBIDDEN, &api_error(403, Some("quotaExceeded")));
        assert_eq!(err, SourceError::QuotaExceeded("upstream says no".into()));

        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, SourceError::QuotaExceeded(_)));

        // A bare 403 is treated as quota exhaustion
        let err = classify_status(StatusCode::FORBIDDEN, "not json");
        assert!(matches!(err, SourceError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_forbidden_other_reason() {
        let err = classify_status(
            StatusCode::FORBIDDEN,
            &api_error(403, Some("accessNotConfigured")),
        );
        assert!(matches!(err, SourceError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_bad_request() {
        let err = classify_status(StatusCode::BAD_REQUEST, &api_error(400, Some("keyInvalid")));
        assert!(matches!(err, SourceError::InvalidRequest(_)));

        let err = classify_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, SourceError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_other_statuses() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = classify_status(status, "");
            assert!(matches!(err, SourceError::Unavailable(_)), "{}", status);
        }
    }

    #[test]
    fn test_search_item_thumbnail_fallback() {
        let body = json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "a1" },
                    "snippet": {
                        "title": "With medium",
                        "description": "d",
                        "channelTitle": "c",
                        "publishedAt": "2020-01-01T00:00:00Z",
                        "thumbnails": {
                            "default": { "url": "https://img/a1/default.jpg" },
                            "medium": { "url": "https://img/a1/mq.jpg" }
                        }
                    }
                },
                {
                    "id": { "kind": "youtube#video", "videoId": "b2" },
                    "snippet": {
                        "title": "Default only",
                        "thumbnails": { "default": { "url": "https://img/b2/default.jpg" } }
                    }
                },
                {
                    "id": { "kind": "youtube#channel", "channelId": "UC123" },
                    "snippet": { "title": "A channel" }
                }
            ]
        });

        let response: SearchListResponse = serde_json::from_value(body).unwrap();
        let videos: Vec<VideoSummary> = response
            .items
            .unwrap()
            .into_iter()
            .filter_map(SearchItem::into_summary)
            .collect();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].thumbnail, "https://img/a1/mq.jpg");
        assert_eq!(videos[0].channel_title, "c");
        assert_eq!(videos[1].thumbnail, "https://img/b2/default.jpg");
        assert_eq!(videos[1].description, "");
    }

    #[test]
    fn test_search_response_without_items() {
        let response: SearchListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.items.is_none());
    }

    #[test]
    fn test_video_item_into_detail() {
        let item: VideoItem = serde_json::from_value(json!({
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "Never Gonna Give You Up",
                "channelTitle": "Rick Astley",
                "thumbnails": { "medium": { "url": "https://img/mq.jpg" } }
            },
            "statistics": { "viewCount": "1500000000", "likeCount": "17000000" },
            "contentDetails": { "duration": "PT3M33S" }
        }))
        .unwrap();

        let detail = item.into_detail();
        assert_eq!(detail.summary.id, "dQw4w9WgXcQ");
        assert_eq!(detail.summary.thumbnail, "https://img/mq.jpg");
        assert_eq!(detail.view_count.as_deref(), Some("1500000000"));
        assert_eq!(detail.like_count.as_deref(), Some("17000000"));
        assert_eq!(detail.duration.as_deref(), Some("PT3M33S"));
    }

    #[test]
    fn test_video_item_without_statistics() {
        let item: VideoItem = serde_json::from_value(json!({ "id": "x" })).unwrap();
        let detail = item.into_detail();

        assert!(detail.view_count.is_none());
        assert!(detail.duration.is_none());
        assert_eq!(detail.summary.thumbnail, "");
    }
}
