//! Core utilities shared across the application.
//!
//! - `cache`: two-tier (memory + file) caching of NHL API responses

pub mod cache;

// Re-export commonly used items for convenience
pub use cache::{try_read_to_string, write_string, CacheKey, GLOBAL_CACHE};
