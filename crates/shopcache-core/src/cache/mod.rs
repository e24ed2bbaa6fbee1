//! Persistent key-value cache for offline data access.
//!
//! This module provides the `CacheStore` trait used by the user directory
//! to survive restarts and offline periods, plus the JSON-file-backed
//! production implementation.

pub mod store;

pub use store::{CacheStore, JsonFileCache};
