//! Request and Response models for the search proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, and the video
//! records shared with the video sources.

pub mod requests;
pub mod responses;
pub mod video;

// Re-export commonly used types
pub use requests::{RawCount, SearchParams, SearchQueryParams, SearchRequest};
pub use responses::{HealthResponse, SearchResponse, VideoResponse};
pub use video::{VideoDetail, VideoSummary};
