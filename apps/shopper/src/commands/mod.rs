//! # Commands Module
//!
//! Boundary commands: each one validates raw front-end input, then runs at
//! most one store operation.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── cart.rs      get_cart, add_to_cart, remove_from_cart, clear_cart,
//! │                checkout_quote
//! ├── wishlist.rs  get_wishlist, toggle_wishlist
//! ├── catalog.rs   browse, view_product, get_recently_viewed,
//! │                update_filters, set_search_query
//! ├── user.rs      get_user, sign_in, sign_out
//! ├── profile.rs   add/remove/select delivery addresses, payment methods,
//! │                preferences
//! └── storage.rs   storage_status
//! ```
//!
//! ## Wire Format
//! [`dispatch`] takes one [`Request`]:
//! ```json
//! { "command": "add_to_cart", "args": { "productId": "1", "quantity": 2 } }
//! ```
//! and answers with the command's response, or an `ApiError`.

pub mod cart;
pub mod catalog;
pub mod profile;
pub mod storage;
pub mod user;
pub mod wishlist;

use market_core::{FilterPatch, Persistence, Preferences, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;
use profile::{AddressForm, PaymentMethodForm};

// =============================================================================
// Response Envelope
// =============================================================================

/// Command result plus a warning when the snapshot write failed.
///
/// The change is applied either way; a warning only means it may not
/// survive a restart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<T> {
    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_warning: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Response for a command that only reads.
    pub fn read(data: T) -> Self {
        CommandResponse {
            data,
            storage_warning: None,
        }
    }

    /// Response for a command that mutated the store.
    pub fn written(data: T, persistence: Persistence) -> Self {
        CommandResponse {
            data,
            storage_warning: persistence.error().map(|e| e.to_string()),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// One front-end request.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    tag = "command",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    GetCart,
    AddToCart { product_id: String, quantity: Option<i64> },
    RemoveFromCart { product_id: String },
    ClearCart,
    CheckoutQuote { delivery_option_id: Option<String> },

    GetWishlist,
    ToggleWishlist { product_id: String },

    Browse { sort: Option<String> },
    ViewProduct { product_id: String },
    GetRecentlyViewed,
    UpdateFilters { patch: FilterPatch },
    SetSearchQuery { query: String },

    GetUser,
    SignIn { user: User },
    SignOut,

    AddDeliveryAddress { address: AddressForm },
    RemoveDeliveryAddress { address_id: String },
    SetDefaultDeliveryAddress { address_id: String },
    AddPaymentMethod { method: PaymentMethodForm },
    RemovePaymentMethod { method_id: String },
    SetPreferences { preferences: Preferences },

    StorageStatus,
}

/// Parses and runs one JSON request line.
pub async fn dispatch_json(session: &SessionState, line: &str) -> Result<serde_json::Value, ApiError> {
    let request: Request = serde_json::from_str(line)
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;
    dispatch(session, request).await
}

/// Runs one request and serializes its response.
pub async fn dispatch(session: &SessionState, request: Request) -> Result<serde_json::Value, ApiError> {
    debug!(?request, "dispatch");

    match request {
        Request::GetCart => to_json(cart::get_cart(session).await),
        Request::AddToCart { product_id, quantity } => {
            to_json(cart::add_to_cart(session, &product_id, quantity).await?)
        }
        Request::RemoveFromCart { product_id } => {
            to_json(cart::remove_from_cart(session, &product_id).await)
        }
        Request::ClearCart => to_json(cart::clear_cart(session).await),
        Request::CheckoutQuote { delivery_option_id } => {
            to_json(cart::checkout_quote(session, delivery_option_id.as_deref()).await?)
        }

        Request::GetWishlist => to_json(wishlist::get_wishlist(session).await),
        Request::ToggleWishlist { product_id } => {
            to_json(wishlist::toggle_wishlist(session, &product_id).await?)
        }

        Request::Browse { sort } => to_json(catalog::browse(session, sort.as_deref()).await?),
        Request::ViewProduct { product_id } => {
            to_json(catalog::view_product(session, &product_id).await?)
        }
        Request::GetRecentlyViewed => to_json(catalog::get_recently_viewed(session).await),
        Request::UpdateFilters { patch } => to_json(catalog::update_filters(session, patch).await?),
        Request::SetSearchQuery { query } => {
            to_json(catalog::set_search_query(session, query).await?)
        }

        Request::GetUser => to_json(user::get_user(session).await),
        Request::SignIn { user } => to_json(user::sign_in(session, user).await),
        Request::SignOut => to_json(user::sign_out(session).await),

        Request::AddDeliveryAddress { address } => {
            to_json(profile::add_delivery_address(session, address).await?)
        }
        Request::RemoveDeliveryAddress { address_id } => {
            to_json(profile::remove_delivery_address(session, &address_id).await?)
        }
        Request::SetDefaultDeliveryAddress { address_id } => {
            to_json(profile::set_default_delivery_address(session, &address_id).await?)
        }
        Request::AddPaymentMethod { method } => {
            to_json(profile::add_payment_method(session, method).await?)
        }
        Request::RemovePaymentMethod { method_id } => {
            to_json(profile::remove_payment_method(session, &method_id).await?)
        }
        Request::SetPreferences { preferences } => {
            to_json(profile::set_preferences(session, preferences).await?)
        }

        Request::StorageStatus => to_json(storage::storage_status(session).await?),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}

// =============================================================================
// Test Fixtures
// =============================================================================
