//! Catalog products sold through the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry. Products are owned by the catalog and never mutated;
/// the cart stores snapshots of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    pub image: String,
}
