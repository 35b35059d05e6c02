//! Request DTOs for the search proxy API
//!
//! Defines the structure of incoming search requests and turns them into
//! validated [`SearchParams`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// Longest accepted search query, in characters after trimming
pub const MAX_QUERY_LENGTH: usize = 100;

/// Result count used when `maxResults` is absent or not numeric
pub const DEFAULT_MAX_RESULTS: u32 = 12;

/// Smallest result count a search may ask for
pub const MIN_MAX_RESULTS: u32 = 1;

/// Largest result count a search may ask for
pub const MAX_MAX_RESULTS: u32 = 50;

/// `maxResults` as sent by the client: a JSON number, a numeric string
/// (query strings only carry strings), or anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawCount {
    /// Integer value of the count, if it has one.
    fn as_integer(&self) -> Option<i64> {
        match self {
            RawCount::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            RawCount::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .map(|n| n.trunc() as i64)
                })
            }
            _ => None,
        }
    }
}

/// Resolves a raw `maxResults` into [1, 50], defaulting to 12.
pub fn resolve_max_results(raw: Option<&RawCount>) -> u32 {
    match raw.and_then(RawCount::as_integer) {
        Some(n) => n.clamp(MIN_MAX_RESULTS as i64, MAX_MAX_RESULTS as i64) as u32,
        None => DEFAULT_MAX_RESULTS,
    }
}

/// Request body for POST /api/search
///
/// # Fields
/// - `query`: The search term
/// - `maxResults`: Optional result count (default 12, clamped to 1..=50)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "maxResults")]
    pub max_results: Option<RawCount>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, max_results: Option<RawCount>) -> Self {
        Self {
            query: Some(query.into()),
            max_results,
        }
    }

    /// Validates the request and resolves its parameters.
    pub fn validate(&self) -> Result<SearchParams, AppError> {
        let query = self.query.as_deref().map(str::trim).unwrap_or_default();

        if query.is_empty() {
            return Err(AppError::validation(
                "A search query is required.",
                "Please enter a valid search term.",
            ));
        }

        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(AppError::validation(
                "Search query is too long.",
                format!(
                    "Search queries must be {} characters or fewer.",
                    MAX_QUERY_LENGTH
                ),
            ));
        }

        Ok(SearchParams {
            query: query.to_string(),
            max_results: resolve_max_results(self.max_results.as_ref()),
        })
    }
}

/// Query string of GET /api/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQueryParams {
    pub q: Option<String>,
    #[serde(rename = "maxResults")]
    pub max_results: Option<String>,
}

impl From<SearchQueryParams> for SearchRequest {
    fn from(params: SearchQueryParams) -> Self {
        Self {
            query: params.q,
            max_results: params.max_results.map(RawCount::Text),
        }
    }
}

// == Search Params ==
/// A validated search: trimmed query and resolved result count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub max_results: u32,
}

impl SearchParams {
    /// Cache slot for this search.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.query, self.max_results)
    }
}
