//! Core utilities for the hoops-fantasy CLI
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: in-memory LRU cache and local paths
//! - `http`: request headers for the hosted league database

pub mod cache;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{cache_root, default_database_path, MemoryCache};
pub use http::api_header_map;
