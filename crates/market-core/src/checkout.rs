//! # Checkout Quote
//!
//! What the checkout page shows before the payment collaborator takes over.
//! No order is created here.
//!
//! ```text
//! Cart ──► subtotal ─────────┐
//!                            ├──► total = subtotal + shipping
//! DeliveryOption? ─► shipping┘    (no option selected → free)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::DeliveryOption;

/// Price breakdown for the current cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    /// Id of the delivery option the shipping fee came from.
    pub delivery_option_id: Option<String>,
    pub subtotal_display: String,
    pub shipping_display: String,
    pub total_display: String,
}

impl CheckoutQuote {
    /// Quotes `cart` with the selected delivery option, if any.
    pub fn new(cart: &Cart, delivery: Option<&DeliveryOption>) -> Self {
        let subtotal = cart.subtotal();
        let shipping = delivery.map(|d| d.price).unwrap_or_default();
        let total = subtotal + shipping;

        CheckoutQuote {
            subtotal,
            shipping,
            total,
            delivery_option_id: delivery.map(|d| d.id.clone()),
            subtotal_display: subtotal.to_string(),
            shipping_display: shipping.to_string(),
            total_display: total.to_string(),
        }
    }

    /// Checks if shipping costs nothing.
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}
