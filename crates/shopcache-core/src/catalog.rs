//! Static demo product catalog.
//!
//! Stands in for a real product service; the cart only ever sees snapshots
//! of these entries.

use rust_decimal::Decimal;

use crate::models::Product;

fn product(id: &str, title: &str, price: i64, description: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Decimal::from(price),
        description: description.to_string(),
        category: category.to_string(),
        image: format!("https://picsum.photos/seed/{}/400", id),
    }
}

/// The demo catalog, prices in INR
pub fn demo_catalog() -> Vec<Product> {
    vec![
        product(
            "p1",
            "Wireless Earbuds",
            2999,
            "True wireless earbuds with noise cancellation and 24h battery",
            "Audio",
        ),
        product(
            "p2",
            "Smart Watch",
            8499,
            "Fitness tracking, heart-rate monitor, AMOLED display",
            "Wearables",
        ),
        product(
            "p3",
            "Bluetooth Speaker",
            1499,
            "Portable speaker with deep bass and IPX7 water resistance",
            "Audio",
        ),
        product(
            "p4",
            "USB-C Power Bank",
            1299,
            "10000 mAh fast-charging power bank with dual outputs",
            "Accessories",
        ),
        product(
            "p5",
            "Mechanical Keyboard",
            4999,
            "Hot-swappable switches, RGB backlight, detachable cable",
            "Electronics",
        ),
        product(
            "p6",
            "Fitness Band",
            2199,
            "Slim activity band with SpO2 and sleep tracking",
            "Wearables",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = demo_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_prices_are_positive() {
        assert!(demo_catalog().iter().all(|p| p.price > Decimal::ZERO));
    }
}
