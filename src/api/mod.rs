//! API Module
//!
//! HTTP handlers and routing for the search proxy REST API.
//!
//! # Endpoints
//! - `POST /api/search` - Search with a JSON body
//! - `GET /api/search` - Search with query parameters
//! - `GET /api/video/:id` - Video details
//! - `GET /api/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_ui};
