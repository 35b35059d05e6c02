//! API Handlers
//!
//! HTTP request handlers for each search proxy endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    Json,
};
use tracing::{error, info};

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::models::{
    HealthResponse, SearchQueryParams, SearchRequest, SearchResponse, VideoResponse, VideoSummary,
};
use crate::source::{select_source, VideoSource};

/// Cache of search results keyed by `"{query}_{maxResults}"`
pub type SearchCache = ExpiringCache<Vec<VideoSummary>>;

/// Application state shared across all handlers.
///
/// The cache and the video source are built once and injected here, so each
/// test can start from a fresh cache and its own source.
#[derive(Clone)]
pub struct AppState {
    /// Search result cache
    pub cache: Arc<SearchCache>,
    /// Video source chosen at startup
    pub source: Arc<dyn VideoSource>,
    /// Include internal details in error bodies
    pub verbose_errors: bool,
}

impl AppState {
    /// Creates a new AppState with the given cache and source.
    pub fn new(cache: SearchCache, source: Arc<dyn VideoSource>) -> Self {
        Self {
            cache: Arc::new(cache),
            source,
            verbose_errors: false,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Picks the live YouTube source when an API key is set, else the mock.
    /// Probes the key first when `VALIDATE_API_KEY` is on.
    pub async fn from_config(config: &Config) -> Self {
        let cache = SearchCache::new(config.search_cache_ttl());
        Self::new(cache, select_source(config).await)
            .with_verbose_errors(config.environment.is_development())
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    /// Wraps an error for the response, honoring the verbosity setting.
    pub fn reject(&self, error: impl Into<AppError>) -> ApiError {
        ApiError {
            error: error.into(),
            verbose: self.verbose_errors,
        }
    }
}

// == Search ==

/// Runs one search: validate, consult the cache, fetch on a miss.
///
/// Shared by the POST and GET bindings of `/api/search`.
pub async fn run_search(
    state: &AppState,
    request: SearchRequest,
) -> Result<SearchResponse, ApiError> {
    let params = request.validate().map_err(|e| state.reject(e))?;
    let cache_key = params.cache_key();

    if let Some(videos) = state.cache.get(&cache_key) {
        info!(query = %params.query, results = videos.len(), "Serving search results from cache");
        return Ok(SearchResponse::new(params.query, videos, true));
    }

    let started = Instant::now();
    let videos = state
        .source
        .search_videos(&params.query, params.max_results)
        .await
        .map_err(|err| {
            error!(query = %params.query, error = %err, "Search failed");
            state.reject(err)
        })?;

    info!(
        query = %params.query,
        results = videos.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Search completed"
    );

    state.cache.set(cache_key, videos.clone(), None);

    Ok(SearchResponse::new(params.query, videos, false))
}

/// Handler for POST /api/search
///
/// Body: `{ "query": "...", "maxResults": 12 }`
pub async fn search_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        state.reject(AppError::validation(
            "Invalid request body.",
            rejection.body_text(),
        ))
    })?;

    run_search(&state, request).await.map(Json)
}

/// Handler for GET /api/search
///
/// Query string: `q` and optional `maxResults`.
pub async fn search_get_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchQueryParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        state.reject(AppError::validation(
            "Invalid query string.",
            rejection.body_text(),
        ))
    })?;

    if params.q.is_none() {
        return Err(state.reject(AppError::validation(
            "A search query is required.",
            "Please provide the q query parameter.",
        )));
    }

    run_search(&state, params.into()).await.map(Json)
}

// == Video Details ==

/// Handler for GET /api/video/:id
pub async fn video_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<VideoResponse>, ApiError> {
    let Path(id) = path.map_err(|rejection| {
        state.reject(AppError::validation(
            "Invalid video ID.",
            rejection.body_text(),
        ))
    })?;
    let id = id.trim();
    if id.is_empty() {
        return Err(state.reject(AppError::validation(
            "A video ID is required.",
            "Please provide a valid video ID.",
        )));
    }

    let video = state.source.get_video_details(id).await.map_err(|err| {
        error!(video_id = id, error = %err, "Video lookup failed");
        state.reject(err)
    })?;

    Ok(Json(VideoResponse::new(video)))
}

// == Health ==

/// Handler for GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.source.kind()))
}

// == Fallback ==

/// Handler for any path no route or static file matched.
///
/// Also answers methods a known route does not serve.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
