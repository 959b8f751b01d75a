//! # Cart
//!
//! Cart lines and totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Front end action         Store operation          Cart change          │
//! │  ────────────────         ───────────────          ───────────          │
//! │                                                                         │
//! │  Add to Cart (new) ──────► add_to_cart() ────────► lines.push(line)     │
//! │                                                                         │
//! │  Add to Cart (again) ────► add_to_cart() ────────► lines[i].qty += n    │
//! │                                                    (position kept,      │
//! │                                                     product kept)       │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► lines.remove(i)       │
//! │                                                    (unknown id: no-op)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::validation::Quantity;

/// One (product, quantity) pairing in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product snapshot taken when the line was first added.
    pub product: Product,

    /// Always greater than zero.
    pub quantity: u32,
}

impl CartLine {
    /// Calculates the line subtotal (unit price × quantity).
    pub fn subtotal(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id
/// - Lines stay in first-add order; quantity updates never move a line
/// - Every quantity is > 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart(Vec<CartLine>);

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart(Vec::new())
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.0
    }

    /// Finds the line for a product id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.0.iter().find(|l| l.product.id == product_id)
    }

    /// Adds a product or merges into the existing line.
    ///
    /// ## Merge Behavior
    /// When a line for `product.id` already exists its quantity grows by
    /// `quantity` and the product snapshot already in the line is kept; the
    /// newly passed product is dropped. Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, product: Product, quantity: Quantity) {
        if let Some(line) = self.0.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());
            return;
        }

        self.0.push(CartLine {
            product,
            quantity: quantity.get(),
        });
    }

    /// Removes the line for `product_id`.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the id was not in the cart.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.0.len();
        self.0.retain(|l| l.product.id != product_id);
        self.0.len() != initial_len
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.0.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.0.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum over lines of price × quantity.
    pub fn subtotal(&self) -> Money {
        self.0.iter().map(CartLine::subtotal).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cart totals summary for front-end responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    /// Subtotal rendered to two decimal places, e.g. "$599.98".
    pub subtotal_display: String,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            subtotal_display: subtotal.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Rating, UserRef};
    use chrono::Utc;

    pub(crate) fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            price: Money::from_cents(price_cents),
            images: vec![],
            category: "Electronics".to_string(),
            seller: UserRef {
                id: "s1".to_string(),
                name: "Tech Store".to_string(),
            },
            rating: Rating::from_tenths(40),
            reviews: vec![],
            stock: 50,
            created_at: Utc::now(),
            delivery_options: vec![],
        }
    }

    fn qty(n: i64) -> Quantity {
        Quantity::try_from(n).unwrap()
    }

    #[test]
    fn test_cart_add_line() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 999), qty(2));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_cart_merge_keeps_position_and_original_product() {
        let mut cart = Cart::new();
        cart.add(test_product("p", 1000), qty(2));
        cart.add(test_product("q", 500), qty(1));

        let mut repriced = test_product("p", 1);
        repriced.title = "Renamed".to_string();
        cart.add(repriced, qty(3));

        assert_eq!(cart.item_count(), 2);
        let first = &cart.lines()[0];
        assert_eq!(first.product.id, "p");
        assert_eq!(first.quantity, 5);
        assert_eq!(first.product.price.cents(), 1000);
        assert_eq!(first.product.title, "Product p");
        assert_eq!(cart.lines()[1].product.id, "q");
    }

    #[test]
    fn test_cart_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 100), qty(1));
        cart.add(test_product("2", 200), qty(2));
        let before = cart.clone();

        assert!(!cart.remove("nonexistent"));
        assert_eq!(cart, before);

        assert!(cart.remove("1"));
        assert_eq!(cart.lines(), &before.lines()[1..]);
    }

    #[test]
    fn test_cart_totals_render_two_decimals() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 29999), qty(2));
        cart.add(test_product("2", 1), qty(1));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.cents(), 59999);
        assert_eq!(totals.subtotal_display, "$599.99");
    }

    #[test]
    fn test_cart_totals_saturate_on_huge_lines() {
        let mut cart = Cart::new();
        cart.add(test_product("big", i64::MAX / 2 + 1), qty(2));
        cart.add(test_product("small", 100), qty(1));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.subtotal.cents(), i64::MAX);
        assert_eq!(cart.lines()[0].subtotal().cents(), i64::MAX);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 999), qty(2));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }
}
