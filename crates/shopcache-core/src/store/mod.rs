//! State containers for the storefront demo.
//!
//! Each container owns its state slice behind a `tokio::sync::watch`
//! channel: mutations go through the container's methods, consumers read
//! immutable snapshots or subscribe for change notification. The slices are
//! independent - no cross-slice locking exists or is needed.

pub mod cart;
pub mod users;

pub use cart::{CartLine, CartState, CartStore};
pub use users::{CachedUsers, FetchOutcome, UserDirectory, UserDirectoryState};
