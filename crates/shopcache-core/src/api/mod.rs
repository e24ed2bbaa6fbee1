//! HTTP client module for the remote user directory service.
//!
//! This module provides the `DirectoryService` trait and its reqwest-backed
//! implementation `DirectoryClient`, which fetches the user list from a
//! jsonplaceholder-style REST endpoint.

pub mod client;
pub mod error;

pub use client::{DirectoryClient, DirectoryService};
pub use error::ApiError;
