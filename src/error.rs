//! Error types for the search proxy
//!
//! Provides unified error handling using thiserror. Video sources report
//! [`SourceError`]; handlers surface everything as [`AppError`], rendered in
//! one JSON shape: `{ "success": false, "error": ..., "message": ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// == Source Error Enum ==
/// Failure categories a video source normalizes upstream errors into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Missing or unusable credential; fatal to the live source
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream rejected the call for quota or rate reasons
    #[error("Upstream quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Upstream rejected the credential or the request itself
    #[error("Invalid upstream request: {0}")]
    InvalidRequest(String),

    /// The requested video does not exist
    #[error("Video not found: {0}")]
    NotFound(String),

    /// Any other transport or service failure, timeouts included
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Error type returned at the HTTP boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad client input
    #[error("{error}: {message}")]
    Validation { error: String, message: String },

    /// Failure reported by the video source
    #[error(transparent)]
    Source(#[from] SourceError),

    /// No route matched the request path
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a validation failure.
    pub fn validation(error: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            error: error.into(),
            message: message.into(),
        }
    }

    // == Status Mapping ==
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Source(source) => match source {
                SourceError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
                SourceError::NotFound(_) => StatusCode::NOT_FOUND,
                SourceError::Configuration(_)
                | SourceError::InvalidRequest(_)
                | SourceError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Short error title and the user-facing message.
    fn summary(&self) -> (String, String) {
        let (error, message) = match self {
            AppError::Validation { error, message } => return (error.clone(), message.clone()),
            AppError::RouteNotFound(_) => (
                "Page not found",
                "The requested resource does not exist.",
            ),
            AppError::Internal(_) => (
                "Internal server error",
                "Something went wrong on the server. Please try again later.",
            ),
            AppError::Source(source) => match source {
                SourceError::QuotaExceeded(_) => (
                    "API quota exceeded",
                    "The YouTube API quota has been exceeded. Please try again later.",
                ),
                SourceError::NotFound(_) => ("Video not found", "No video exists with that ID."),
                SourceError::Configuration(_) => (
                    "YouTube API is not configured",
                    "Please contact the server administrator.",
                ),
                SourceError::InvalidRequest(_) => (
                    "API key error",
                    "There is a problem with the YouTube API key configuration.",
                ),
                SourceError::Unavailable(_) => (
                    "YouTube service unavailable",
                    "Could not reach YouTube. Please try again.",
                ),
            },
        };
        (error.to_string(), message.to_string())
    }

    // == Rendering ==
    /// Renders the error, attaching internal details when `verbose` is set.
    pub fn into_response_with(self, verbose: bool) -> Response {
        let status = self.status();
        let (error, message) = self.summary();
        let path = match &self {
            AppError::RouteNotFound(path) => Some(path.clone()),
            _ => None,
        };
        let details = verbose.then(|| self.to_string());

        let body = ErrorBody {
            success: false,
            error,
            message,
            path,
            details,
        };

        (status, Json(body)).into_response()
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

// == Api Error ==
/// An [`AppError`] paired with the server's verbosity setting.
///
/// Handlers build these through `AppState::reject` so development servers
/// include internal details in error bodies.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub verbose: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.into_response_with(self.verbose)
    }
}

/// JSON body shared by every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// == Result Type Alias ==
/// Convenience Result type for video sources.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
