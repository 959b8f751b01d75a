//! # Validation Module
//!
//! Input validation for the boundary between the front end and the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end forms                                              │
//! │  └── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Boundary commands (shopper app)                              │
//! │  └── THIS MODULE: quantity, address, card and filter checks            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store operations                                             │
//! │  └── Total functions, no checks (inputs are already well-formed)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::validation::{validate_quantity, Quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(Quantity::try_from(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::PriceRange;
use crate::error::ValidationError;
use crate::money::Money;
use crate::profile::{Address, PaymentKind, PaymentMethod};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity
// =============================================================================

/// A cart quantity that has passed [`validate_quantity`].
///
/// `ShoppingStateStore::add_to_cart` only accepts this type, so a zero or
/// negative quantity cannot reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Quantity(u32);

impl Quantity {
    /// One unit.
    pub const ONE: Quantity = Quantity(1);

    /// Returns the raw quantity.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(qty: i64) -> Result<Self, Self::Error> {
        validate_quantity(qty)?;
        Ok(Quantity(qty as u32))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Quantity::try_from(raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999) per add
///
/// ## User Workflow
/// ```text
/// Product page quantity picker: 5
///      │
///      ▼
/// validate_quantity(5) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → Error: "quantity must be positive"
///      ├── qty > 999? → Error: "quantity must be between 1 and 999"
///      └── OK → add_to_cart
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or fee.
///
/// ## Example
/// ```rust
/// use market_core::money::Money;
/// use market_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price range coming from the filter sidebar.
///
/// The store itself accepts inverted ranges (they simply match nothing);
/// this check is for the boundary.
pub fn validate_price_range(range: &PriceRange) -> ValidationResult<()> {
    validate_price(range.lower())?;
    validate_price(range.upper())?;

    if range.lower() > range.upper() {
        return Err(ValidationError::InvalidFormat {
            field: "priceRange".to_string(),
            reason: format!("lower bound {} exceeds upper bound {}", range.lower(), range.upper()),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// Empty is allowed (matches everything). The query is returned as given;
/// the store does not trim or normalize it.
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(())
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a delivery address form.
///
/// ## Rules
/// - street, city, state, country and zipCode are all required
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    require("street", &address.street)?;
    require("city", &address.city)?;
    require("state", &address.state)?;
    require("country", &address.country)?;
    require("zipCode", &address.zip_code)?;
    Ok(())
}

/// Validates a saved payment method.
///
/// ## Rules
/// - Cards need `last4` (exactly four digits) and an expiry month 1-12
/// - PayPal entries carry no card data
pub fn validate_payment_method(method: &PaymentMethod) -> ValidationResult<()> {
    require("id", &method.id)?;

    match method.kind {
        PaymentKind::Card => {
            let last4 = method.last4.as_deref().ok_or_else(|| ValidationError::Required {
                field: "last4".to_string(),
            })?;
            if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::InvalidFormat {
                    field: "last4".to_string(),
                    reason: "must be exactly four digits".to_string(),
                });
            }

            match method.expiry_month {
                Some(month) if (1..=12).contains(&month) => Ok(()),
                Some(_) => Err(ValidationError::OutOfRange {
                    field: "expiryMonth".to_string(),
                    min: 1,
                    max: 12,
                }),
                None => Err(ValidationError::Required {
                    field: "expiryMonth".to_string(),
                }),
            }
        }
        PaymentKind::Paypal => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
