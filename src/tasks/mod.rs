//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache Cleanup: Sweeps expired search results at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
