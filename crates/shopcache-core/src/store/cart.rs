//! In-memory cart ledger with derived totals.
//!
//! Totals are never settable: every mutation recomputes them from the lines
//! before the new snapshot becomes visible.

use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::models::Product;

/// One line per distinct product id; the product snapshot is taken at the
/// time of the first add.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_amount: Decimal,
}

impl CartState {
    fn recompute_totals(&mut self) {
        self.total_items = self.lines.iter().map(|line| u64::from(line.quantity)).sum();
        self.total_amount = self.lines.iter().map(CartLine::line_total).sum();
    }
}

pub struct CartStore {
    state: watch::Sender<CartState>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (state, _rx) = watch::channel(CartState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Add one unit of a product: increments the existing line or appends a
    /// fresh line with quantity 1.
    pub fn add_to_cart(&self, product: Product) {
        self.state.send_modify(|cart| {
            match cart.lines.iter_mut().find(|line| line.product.id == product.id) {
                Some(line) => line.quantity += 1,
                None => cart.lines.push(CartLine {
                    product,
                    quantity: 1,
                }),
            }
            cart.recompute_totals();
        });
    }

    /// Drop the line for a product; no-op if it is not in the cart.
    pub fn remove_from_cart(&self, product_id: &str) {
        self.state.send_modify(|cart| {
            cart.lines.retain(|line| line.product.id != product_id);
            cart.recompute_totals();
        });
    }

    /// Set a line's quantity. Zero removes the line; an id not in the cart
    /// is a no-op.
    pub fn update_quantity(&self, product_id: &str, quantity: u32) {
        self.state.send_modify(|cart| {
            if quantity == 0 {
                cart.lines.retain(|line| line.product.id != product_id);
            } else if let Some(line) = cart
                .lines
                .iter_mut()
                .find(|line| line.product.id == product_id)
            {
                line.quantity = quantity;
            }
            cart.recompute_totals();
        });
    }

    pub fn clear(&self) {
        self.state.send_replace(CartState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            price: Decimal::from(price),
            description: String::new(),
            category: "Electronics".to_string(),
            image: String::new(),
        }
    }

    /// Totals must equal the fold of the lines after every operation
    fn assert_totals_consistent(cart: &CartState) {
        let items: u64 = cart.lines.iter().map(|l| u64::from(l.quantity)).sum();
        let amount: Decimal = cart.lines.iter().map(CartLine::line_total).sum();
        assert_eq!(cart.total_items, items);
        assert_eq!(cart.total_amount, amount);
    }

    #[test]
    fn test_add_merges_lines_by_product_id() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 100));
        store.add_to_cart(product("p1", 100));

        let cart = store.snapshot();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 100));
        store.add_to_cart(product("p1", 100));
        store.remove_from_cart("p1");
        store.add_to_cart(product("p1", 100));

        let cart = store.snapshot();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let a = CartStore::new();
        a.add_to_cart(product("p1", 100));
        a.update_quantity("p1", 0);

        let b = CartStore::new();
        b.add_to_cart(product("p1", 100));
        b.remove_from_cart("p1");

        assert_eq!(a.snapshot(), b.snapshot());
        assert!(a.snapshot().lines.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 100));
        store.update_quantity("p2", 5);

        let cart = store.snapshot();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_items, 1);
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 100));
        store.remove_from_cart("p2");

        assert_eq!(store.snapshot().total_items, 1);
    }

    #[test]
    fn test_totals_follow_mutation_sequence() {
        let store = CartStore::new();

        store.add_to_cart(product("p1", 100));
        let cart = store.snapshot();
        assert_eq!((cart.total_items, cart.total_amount), (1, Decimal::from(100)));

        store.add_to_cart(product("p1", 100));
        let cart = store.snapshot();
        assert_eq!((cart.total_items, cart.total_amount), (2, Decimal::from(200)));

        store.update_quantity("p1", 5);
        let cart = store.snapshot();
        assert_eq!((cart.total_items, cart.total_amount), (5, Decimal::from(500)));

        store.remove_from_cart("p1");
        let cart = store.snapshot();
        assert_eq!((cart.total_items, cart.total_amount), (0, Decimal::ZERO));
    }

    #[test]
    fn test_mixed_products_totals() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 2999));
        store.add_to_cart(product("p2", 1499));
        store.add_to_cart(product("p2", 1499));

        let cart = store.snapshot();
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_amount, Decimal::from(2999 + 2 * 1499));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_clear_resets_everything() {
        let store = CartStore::new();
        store.add_to_cart(product("p1", 100));
        store.add_to_cart(product("p2", 250));
        store.clear();

        assert_eq!(store.snapshot(), CartState::default());
    }

    #[test]
    fn test_subscribers_observe_mutations() {
        let store = CartStore::new();
        let rx = store.subscribe();

        store.add_to_cart(product("p1", 100));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().total_items, 1);
    }
}
