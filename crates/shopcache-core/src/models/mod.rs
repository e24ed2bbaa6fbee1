//! Data models for the storefront demo.
//!
//! This module contains the data structures shared across the state
//! containers:
//!
//! - `Product`: catalog entries sold through the cart
//! - `User`, `Address`, `Geo`, `Company`: user directory records

pub mod product;
pub mod user;

pub use product::Product;
pub use user::{Address, Company, Geo, User};
