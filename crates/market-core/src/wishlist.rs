//! # Wishlist & Recently Viewed
//!
//! The two product collections the shopper builds while browsing.
//!
//! ```text
//! Wishlist        set semantics by product id, toggle in / toggle out
//! RecentlyViewed  most-recent-first, unique by id, at most 10 entries
//!
//! view(E) with [K, J, I, H, G, F, E, D, C, B]
//!   └─► [E, K, J, I, H, G, F, D, C, B]   (moved, count unchanged)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;
use crate::RECENTLY_VIEWED_LIMIT;

// =============================================================================
// Wishlist
// =============================================================================

/// Products the shopper has hearted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Wishlist(Vec<Product>);

impl Wishlist {
    pub fn new() -> Self {
        Wishlist(Vec::new())
    }

    /// Adds the product if absent (by id), removes it if present.
    ///
    /// ## Returns
    /// `true` if the product is in the wishlist afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        let initial_len = self.0.len();
        self.0.retain(|p| p.id != product.id);
        if self.0.len() != initial_len {
            return false;
        }

        self.0.push(product);
        true
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.0.iter().any(|p| p.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Recently Viewed
// =============================================================================

/// Browsing history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentlyViewed(Vec<Product>);

impl RecentlyViewed {
    pub fn new() -> Self {
        RecentlyViewed(Vec::new())
    }

    /// Moves or inserts the product at the front and drops anything past
    /// [`RECENTLY_VIEWED_LIMIT`].
    pub fn record(&mut self, product: Product) {
        self.0.retain(|p| p.id != product.id);
        self.0.insert(0, product);
        self.0.truncate(RECENTLY_VIEWED_LIMIT);
    }

    pub fn products(&self) -> &[Product] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_wishlist_double_toggle_is_identity() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(test_product("a", 100));
        let before = wishlist.clone();

        assert!(wishlist.toggle(test_product("b", 200)));
        assert!(wishlist.contains("b"));
        assert!(!wishlist.toggle(test_product("b", 200)));

        assert_eq!(wishlist, before);
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_wishlist_uniqueness_by_id() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(test_product("a", 100));

        // Same id with different metadata toggles the entry out.
        assert!(!wishlist.toggle(test_product("a", 999)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_recently_viewed_cap_and_eviction() {
        let mut history = RecentlyViewed::new();
        let letters = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"];
        for id in letters {
            history.record(test_product(id, 100));
        }

        assert_eq!(history.len(), 10);
        assert_eq!(
            ids(history.products()),
            vec!["K", "J", "I", "H", "G", "F", "E", "D", "C", "B"]
        );
    }

    #[test]
    fn test_recently_viewed_reorders_without_duplicating() {
        let mut history = RecentlyViewed::new();
        for id in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"] {
            history.record(test_product(id, 100));
        }

        history.record(test_product("E", 100));

        assert_eq!(history.len(), 10);
        assert_eq!(
            ids(history.products()),
            vec!["E", "K", "J", "I", "H", "G", "F", "D", "C", "B"]
        );
    }
}
