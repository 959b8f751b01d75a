//! # Domain Types
//!
//! Catalog types referenced by the shopping state.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Review      │   │ DeliveryOption  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  title          │   │  author ─► UserRef  │  name           │       │
//! │  │  price (Money)  │   │  rating         │   │  price (Money)  │       │
//! │  │  seller ─► UserRef  │  comment        │   │  estimated_days │       │
//! │  │  rating         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │     Rating      │  tenths of a star, 0..=50 (4.5★ = 45)             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the catalog collaborator. The store keeps copies
//! inside cart lines, the wishlist and the history but never edits them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rating
// =============================================================================

/// Star rating stored in tenths of a star.
///
/// ## Why Tenths?
/// Ratings are compared (`>=` threshold) and sorted. An integer keeps the
/// ordering total, so sorting never has to deal with NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Rating(u8);

impl Rating {
    /// Highest possible rating (5.0 stars).
    pub const MAX: Rating = Rating(50);

    /// Creates a rating from tenths of a star, clamped to 0..=50.
    #[inline]
    pub const fn from_tenths(tenths: u8) -> Self {
        if tenths > 50 {
            Rating(50)
        } else {
            Rating(tenths)
        }
    }

    /// Creates a rating from a star value (for convenience), rounded to the
    /// nearest tenth and clamped to 0.0..=5.0.
    pub fn from_stars(stars: f64) -> Self {
        let tenths = (stars * 10.0).round().clamp(0.0, 50.0);
        Rating(tenths as u8)
    }

    /// Returns the rating in tenths of a star.
    #[inline]
    pub const fn tenths(&self) -> u8 {
        self.0
    }

    /// Returns the rating in stars (for display only).
    #[inline]
    pub fn stars(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

/// Rejects anything above 50 instead of clamping, so a bad catalog entry
/// cannot pass every rating threshold.
impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tenths = u8::deserialize(deserializer)?;
        if tenths > Rating::MAX.0 {
            return Err(serde::de::Error::custom(format!(
                "rating must be between 0 and {} tenths of a star, got {}",
                Rating::MAX.0,
                tenths
            )));
        }
        Ok(Rating(tenths))
    }
}

// =============================================================================
// User Reference
// =============================================================================

/// Lightweight reference to a user shown next to catalog data
/// (product seller, review author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display title, matched by the search query.
    pub title: String,

    pub description: String,

    /// Unit price (never negative).
    pub price: Money,

    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,

    pub category: String,

    /// Who sells it.
    pub seller: UserRef,

    /// Average rating, 0 to 5 stars.
    pub rating: Rating,

    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Units in stock as reported by the catalog.
    pub stock: u32,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Shipping choices offered at checkout.
    #[serde(default)]
    pub delivery_options: Vec<DeliveryOption>,
}

// =============================================================================
// Review
// =============================================================================

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: String,
    pub author: UserRef,
    pub rating: Rating,
    pub comment: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Delivery Option
// =============================================================================

/// A shipping method offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryOption {
    pub id: String,
    pub name: String,
    /// Shipping fee; zero means free shipping.
    pub price: Money,
    pub estimated_days: u32,
    pub provider: String,
    #[serde(default)]
    pub tracking: bool,
}

impl DeliveryOption {
    /// Checks if this option ships for free.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_from_stars() {
        assert_eq!(Rating::from_stars(4.5).tenths(), 45);
        assert_eq!(Rating::from_stars(4.04).tenths(), 40);
        assert_eq!(Rating::from_stars(7.0), Rating::MAX);
        assert_eq!(Rating::from_stars(-1.0).tenths(), 0);
        assert!((Rating::from_tenths(45).stars() - 4.5).abs() < 0.001);
    }

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::from_tenths(40) < Rating::from_tenths(45));
        assert_eq!(Rating::from_tenths(99), Rating::MAX);
        assert_eq!(Rating::default().tenths(), 0);
    }

    #[test]
    fn test_delivery_option_free() {
        let option = DeliveryOption {
            id: "std".to_string(),
            name: "Standard".to_string(),
            price: Money::zero(),
            estimated_days: 5,
            provider: "Postal".to_string(),
            tracking: false,
        };
        assert!(option.is_free());
    }

    #[test]
    fn test_product_deserializes_without_optional_lists() {
        let json = r#"{
            "id": "1",
            "title": "Premium Headphones",
            "description": "Wireless",
            "price": 29999,
            "category": "Electronics",
            "seller": { "id": "s1", "name": "Tech Store" },
            "rating": 45,
            "stock": 50,
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.images.is_empty());
        assert!(product.delivery_options.is_empty());
        assert_eq!(product.rating.tenths(), 45);
    }

    #[test]
    fn test_rating_above_five_stars_is_rejected() {
        assert_eq!(serde_json::from_str::<Rating>("50").unwrap(), Rating::MAX);
        assert!(serde_json::from_str::<Rating>("51").is_err());
        assert!(serde_json::from_str::<Rating>("200").is_err());
        assert!(serde_json::from_str::<Rating>("-1").is_err());
    }
}
