//! YouTube Player - A thin YouTube search proxy
//!
//! Proxies search and lookup requests to the YouTube Data API, caches search
//! results in memory for a few minutes, and falls back to a mock catalog when
//! no API key is configured.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
