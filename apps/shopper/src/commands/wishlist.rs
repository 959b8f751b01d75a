//! # Wishlist Commands

use market_core::Product;
use serde::Serialize;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    /// Whether the toggled product is on the wishlist afterwards.
    pub wishlisted: bool,
    pub products: Vec<Product>,
}

pub async fn get_wishlist(session: &SessionState) -> CommandResponse<Vec<Product>> {
    let store = session.store().await;
    CommandResponse::read(store.state().wishlist().products().to_vec())
}

/// Adds the product if absent, removes it if present.
pub async fn toggle_wishlist(
    session: &SessionState,
    product_id: &str,
) -> Result<CommandResponse<WishlistResponse>, ApiError> {
    let product = session
        .catalog()
        .find(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let mut store = session.store().await;
    let (wishlisted, persistence) = store.toggle_wishlist(product).await;

    Ok(CommandResponse::written(
        WishlistResponse {
            wishlisted,
            products: store.state().wishlist().products().to_vec(),
        },
        persistence,
    ))
}
