//! # Store State
//!
//! The shopping-state aggregate and its mutation rules. Everything here is
//! synchronous and infallible; persistence is layered on top by
//! [`crate::store::ShoppingStateStore`].
//!
//! ## Snapshot Shape
//! ```text
//! {
//!   "user":           User | null,
//!   "cart":           [ { "product": Product, "quantity": 2 }, ... ],
//!   "wishlist":       [ Product, ... ],
//!   "recentlyViewed": [ Product, ... ],        newest first, max 10
//!   "filters":        { "category": [], "priceRange": [0, 100000], "rating": 0 },
//!   "searchQuery":    ""
//! }
//! ```
//! Every key is optional when decoding; a missing key takes its default.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartTotals};
use crate::catalog::{filtered_and_sorted, FilterPatch, FilterState, SortKey};
use crate::checkout::CheckoutQuote;
use crate::profile::{ProfileEdit, User};
use crate::types::{DeliveryOption, Product};
use crate::validation::Quantity;
use crate::wishlist::{RecentlyViewed, Wishlist};

/// Everything the shopper accumulates during and across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct StoreState {
    user: Option<User>,
    cart: Cart,
    wishlist: Wishlist,
    recently_viewed: RecentlyViewed,
    filters: FilterState,
    search_query: String,
}

impl StoreState {
    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn recently_viewed(&self) -> &RecentlyViewed {
        &self.recently_viewed
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the current user (`None` signs out).
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Adds `quantity` of `product`, merging into an existing line.
    ///
    /// See [`Cart::add`] for the merge rules.
    pub fn add_to_cart(&mut self, product: Product, quantity: Quantity) {
        self.cart.add(product, quantity);
    }

    /// Removes the line for `product_id`. Unknown ids are a no-op.
    ///
    /// ## Returns
    /// `true` if a line was removed.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        self.cart.remove(product_id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Toggles wishlist membership. Returns `true` if now wishlisted.
    pub fn toggle_wishlist(&mut self, product: Product) -> bool {
        self.wishlist.toggle(product)
    }

    pub fn add_to_recently_viewed(&mut self, product: Product) {
        self.recently_viewed.record(product);
    }

    /// Shallow-merges `patch` into the active filters. Ranges are taken
    /// as given.
    pub fn update_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
    }

    /// Replaces the search query verbatim (no trimming).
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Applies a profile edit to the current user.
    ///
    /// ## Returns
    /// `false` when nobody is signed in (the edit is dropped).
    pub fn edit_profile(&mut self, edit: ProfileEdit) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.apply(edit);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Derived Reads
    // =========================================================================

    /// Filters and sorts `products` with the store's own filters and query.
    pub fn browse<'a>(&self, products: &'a [Product], sort: SortKey) -> Vec<&'a Product> {
        filtered_and_sorted(products, &self.filters, &self.search_query, sort)
    }

    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    pub fn checkout_quote(&self, delivery: Option<&DeliveryOption>) -> CheckoutQuote {
        CheckoutQuote::new(&self.cart, delivery)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;
    use crate::profile::{Address, Role};

    fn signed_in() -> StoreState {
        let mut state = StoreState::default();
        state.set_user(Some(User::new("u1", "Ada", "ada@example.com", Role::User)));
        state
    }

    #[test]
    fn test_default_state() {
        let state = StoreState::default();
        assert!(state.user().is_none());
        assert!(state.cart().is_empty());
        assert!(state.wishlist().is_empty());
        assert!(state.recently_viewed().is_empty());
        assert_eq!(state.filters(), &FilterState::default());
        assert_eq!(state.search_query(), "");
    }

    #[test]
    fn test_set_search_query_is_verbatim() {
        let mut state = StoreState::default();
        state.set_search_query("  Head  ");
        assert_eq!(state.search_query(), "  Head  ");
    }

    #[test]
    fn test_edit_profile_without_user_is_noop() {
        let mut state = StoreState::default();
        let applied = state.edit_profile(ProfileEdit::RemovePaymentMethod("pm".to_string()));

        assert!(!applied);
        assert_eq!(state, StoreState::default());
    }

    #[test]
    fn test_edit_profile_with_user() {
        let mut state = signed_in();
        let applied = state.edit_profile(ProfileEdit::AddDeliveryAddress(Address {
            id: "a1".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
            is_default: true,
        }));

        assert!(applied);
        let profile = state.user().and_then(|u| u.profile.as_ref()).unwrap();
        assert_eq!(profile.default_delivery_address().unwrap().id, "a1");
    }

    #[test]
    fn test_browse_uses_store_query() {
        let mut state = StoreState::default();
        let mut lamp = test_product("1", 3000);
        lamp.title = "Desk Lamp".to_string();
        let products = vec![lamp, test_product("2", 1000)];

        state.set_search_query("lamp");
        let listing = state.browse(&products, SortKey::Price);

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, "1");
    }

    #[test]
    fn test_totals_and_quote_follow_cart() {
        let mut state = StoreState::default();
        state.add_to_cart(test_product("1", 1000), Quantity::try_from(3).unwrap());

        assert_eq!(state.cart_totals().subtotal_display, "$30.00");
        assert_eq!(state.checkout_quote(None).total.cents(), 3000);

        state.clear_cart();
        assert_eq!(state.cart_totals().item_count, 0);
    }
}
