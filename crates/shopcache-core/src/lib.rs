//! Core library for shopcache - the state layer of an offline-first demo
//! storefront.
//!
//! Three independent state containers cover the app's slices:
//!
//! - [`store::CartStore`]: cart lines with derived totals
//! - [`store::UserDirectory`]: cache-then-network user list with TTL-based
//!   staleness and offline fallback
//! - [`auth::AuthManager`]: secure token storage in lockstep with an
//!   in-memory authenticated flag
//!
//! External collaborators (cache store, secret store, connectivity, remote
//! directory) sit behind traits so the containers are injectable and
//! testable; production implementations are provided for each.

pub mod api;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod connectivity;
pub mod device;
pub mod models;
pub mod store;
pub mod utils;
