//! # market-core: Shopping-State Logic for the Marketplace
//!
//! Cart, wishlist, browsing history, catalog filters and the current user,
//! with the rules that govern each. No I/O happens here: durable storage is
//! reached through the [`store::SnapshotSink`] trait, implemented elsewhere.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Marketplace Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front end (web, TS bindings)                   │   │
//! │  │    Marketplace ──► Product page ──► Cart ──► Checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ boundary commands                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shopper app                                  │   │
//! │  │    add_to_cart, toggle_wishlist, update_filters, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   state   │  │   cart    │  │  catalog  │  │ validation│  │   │
//! │  │   │ StoreState│  │   Cart    │  │  filters  │  │  Quantity │  │   │
//! │  │   │   store   │  │ wishlist  │  │  sorting  │  │   forms   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • NO FILES                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SnapshotSink                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    market-db (SQLite)                           │   │
//! │  │              store_snapshots table, migrations                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Review, DeliveryOption, Rating)
//! - [`profile`] - User, Profile and profile edits
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart lines and totals
//! - [`wishlist`] - Wishlist and recently-viewed history
//! - [`catalog`] - Filter state and the filtered/sorted listing
//! - [`checkout`] - Checkout quote
//! - [`state`] - The `StoreState` aggregate
//! - [`snapshot`] - JSON snapshot codec
//! - [`store`] - Write-through `ShoppingStateStore` and sinks
//! - [`validation`] - Boundary input validation
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{MemorySink, ShoppingStateStore, STORE_NAME};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut store = ShoppingStateStore::open(STORE_NAME, MemorySink::new()).await;
//! let outcome = store.set_search_query("headphones").await;
//!
//! assert!(outcome.is_persisted());
//! assert_eq!(store.state().search_query(), "headphones");
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod profile;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{filtered_and_sorted, FilterPatch, FilterState, PriceRange, SortKey};
pub use checkout::CheckoutQuote;
pub use error::{CoreError, PersistError, ValidationError};
pub use money::Money;
pub use profile::{Address, PaymentKind, PaymentMethod, Preferences, Profile, ProfileEdit, Role, User};
pub use snapshot::STORE_NAME;
pub use state::StoreState;
pub use store::{MemorySink, Persistence, ShoppingStateStore, SnapshotSink};
pub use types::*;
pub use validation::Quantity;
pub use wishlist::{RecentlyViewed, Wishlist};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted by a single add-to-cart.
///
/// Merged lines may grow past this; only each individual add is checked.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Number of products kept in the recently-viewed history.
pub const RECENTLY_VIEWED_LIMIT: usize = 10;
