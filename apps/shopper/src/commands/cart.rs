//! # Cart Commands
//!
//! Commands for reading and changing the cart.
//!
//! ## Available Commands
//! - `get_cart`: Current lines and totals
//! - `add_to_cart`: Add a catalog product (merges into an existing line)
//! - `remove_from_cart`: Drop a line
//! - `clear_cart`: Empty the cart
//! - `checkout_quote`: Subtotal plus the chosen delivery fee

use market_core::{Cart, CartLine, CartTotals, CheckoutQuote, Quantity};
use serde::Serialize;
use tracing::debug;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// Cart contents for the front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

pub async fn get_cart(session: &SessionState) -> CommandResponse<CartResponse> {
    let store = session.store().await;
    CommandResponse::read(CartResponse::from(store.state().cart()))
}

/// Adds `quantity` (default 1) of a catalog product.
///
/// ## Errors
/// - `VALIDATION_ERROR` when quantity is outside 1..=999
/// - `NOT_FOUND` when the product is not in the catalog
pub async fn add_to_cart(
    session: &SessionState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CommandResponse<CartResponse>, ApiError> {
    let quantity = match quantity {
        Some(raw) => Quantity::try_from(raw)?,
        None => Quantity::ONE,
    };

    let product = session
        .catalog()
        .find(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let mut store = session.store().await;
    let persistence = store.add_to_cart(product, quantity).await;

    Ok(CommandResponse::written(
        CartResponse::from(store.state().cart()),
        persistence,
    ))
}

/// Removes the line for `product_id`. Unknown ids leave the cart as is.
pub async fn remove_from_cart(session: &SessionState, product_id: &str) -> CommandResponse<CartResponse> {
    let mut store = session.store().await;
    let persistence = store.remove_from_cart(product_id).await;
    CommandResponse::written(CartResponse::from(store.state().cart()), persistence)
}

pub async fn clear_cart(session: &SessionState) -> CommandResponse<CartResponse> {
    let mut store = session.store().await;
    let persistence = store.clear_cart().await;
    CommandResponse::written(CartResponse::from(store.state().cart()), persistence)
}

/// Quotes the cart with an optional delivery option.
///
/// The option is looked up among the delivery options of the products in
/// the cart.
pub async fn checkout_quote(
    session: &SessionState,
    delivery_option_id: Option<&str>,
) -> Result<CommandResponse<CheckoutQuote>, ApiError> {
    let store = session.store().await;
    let cart = store.state().cart();

    let delivery = match delivery_option_id {
        Some(id) => Some(
            cart.lines()
                .iter()
                .flat_map(|line| line.product.delivery_options.iter())
                .find(|option| option.id == id)
                .ok_or_else(|| ApiError::not_found("Delivery option", id))?,
        ),
        None => None,
    };

    let quote = store.state().checkout_quote(delivery);
    debug!(total = %quote.total, delivery = ?quote.delivery_option_id, "checkout_quote");
    Ok(CommandResponse::read(quote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_to_cart_defaults_to_one() {
        let session = testing::session().await;

        let response = add_to_cart(&session, "1", None).await.unwrap();

        assert_eq!(response.data.lines.len(), 1);
        assert_eq!(response.data.lines[0].quantity, 1);
        assert_eq!(response.data.totals.subtotal_display, "$299.99");
        assert!(response.storage_warning.is_none());
    }

    #[tokio::test]
    async fn test_add_same_product_merges_quantity() {
        let session = testing::session().await;

        add_to_cart(&session, "2", Some(2)).await.unwrap();
        let response = add_to_cart(&session, "2", Some(3)).await.unwrap();

        assert_eq!(response.data.totals.item_count, 1);
        assert_eq!(response.data.totals.total_quantity, 5);
        assert_eq!(response.data.totals.subtotal.cents(), 15000);
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_bad_quantity() {
        let session = testing::session().await;

        for bad in [0, -1, 1000] {
            let err = add_to_cart(&session, "1", Some(bad)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }

        assert!(get_cart(&session).await.data.lines.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let session = testing::session().await;
        let err = add_to_cart(&session, "nope", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let session = testing::session().await;
        add_to_cart(&session, "1", None).await.unwrap();
        add_to_cart(&session, "3", None).await.unwrap();

        let response = remove_from_cart(&session, "1").await;
        assert_eq!(response.data.lines.len(), 1);
        assert_eq!(response.data.lines[0].product.id, "3");

        let response = remove_from_cart(&session, "missing").await;
        assert_eq!(response.data.lines.len(), 1);

        let response = clear_cart(&session).await;
        assert!(response.data.lines.is_empty());
        assert_eq!(response.data.totals.subtotal_display, "$0.00");
    }

    #[tokio::test]
    async fn test_checkout_quote_with_delivery() {
        let session = testing::session().await;
        add_to_cart(&session, "2", Some(2)).await.unwrap();

        let plain = checkout_quote(&session, None).await.unwrap().data;
        assert_eq!(plain.total_display, "$60.00");
        assert!(plain.ships_free());

        let express = checkout_quote(&session, Some("express")).await.unwrap().data;
        assert_eq!(express.shipping_display, "$9.99");
        assert_eq!(express.total_display, "$69.99");
        assert_eq!(express.delivery_option_id.as_deref(), Some("express"));

        let err = checkout_quote(&session, Some("drone")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
