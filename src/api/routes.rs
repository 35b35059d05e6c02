//! API Routes
//!
//! Configures the Axum router with all search proxy endpoints.

use std::any::Any;
use std::path::PathBuf;

use axum::{
    handler::HandlerWithoutStateExt,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    health_handler, not_found_handler, search_get_handler, search_post_handler, video_handler,
    AppState,
};
use crate::error::AppError;

/// Creates the API router without the browser UI.
///
/// # Endpoints
/// - `POST /api/search` - Search with a JSON body
/// - `GET /api/search?q=` - Search with query parameters
/// - `GET /api/video/:id` - Video details
/// - `GET /api/health` - Health check endpoint
///
/// Unknown paths get a JSON 404.
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Creates the API router that also serves the browser UI from `static_dir`.
///
/// Paths that match neither a route nor a file get the JSON 404.
pub fn create_router_with_ui(state: AppState, static_dir: impl Into<PathBuf>) -> Router {
    build_router(state, Some(static_dir.into()))
}

fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let verbose = state.verbose_errors;

    // Unserved methods on known paths get the JSON 404 instead of a bare 405
    let api = Router::new()
        .route(
            "/api/search",
            post(search_post_handler)
                .get(search_get_handler)
                .fallback(not_found_handler),
        )
        .route(
            "/api/video/:id",
            get(video_handler).fallback(not_found_handler),
        )
        .route("/api/health", get(health_handler).fallback(not_found_handler));

    let router = match static_dir {
        Some(dir) => api.fallback_service(
            ServeDir::new(dir).not_found_service(not_found_handler.into_service()),
        ),
        None => api.fallback(not_found_handler),
    };

    router
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| panic_response(err, verbose),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Renders a handler panic as a generic 500 in the shared error shape.
fn panic_response(err: Box<dyn Any + Send + 'static>, verbose: bool) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Request handler panicked");
    AppError::Internal(detail).into_response_with(verbose)
}
