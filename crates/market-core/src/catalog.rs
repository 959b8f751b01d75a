//! # Catalog Filtering
//!
//! Filter state kept by the store and the derived "filtered and sorted"
//! listing shown on the marketplace page.
//!
//! ## Filter Pipeline
//! ```text
//! all products (from the catalog collaborator)
//!      │
//!      ▼
//! title contains query (case-insensitive)
//!      │
//!      ▼
//! category ∈ filters.category   (empty set = any category)
//!      │
//!      ▼
//! lower ≤ price ≤ upper
//!      │
//!      ▼
//! rating ≥ filters.rating
//!      │
//!      ▼
//! stable sort: Price ↑ | Rating ↓
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Rating};

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive `[lower, upper]` price bounds.
///
/// Serialized as a two-element array. Nothing prevents `lower > upper`;
/// such a range matches no product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange(Money, Money);

impl PriceRange {
    pub const fn new(lower: Money, upper: Money) -> Self {
        PriceRange(lower, upper)
    }

    #[inline]
    pub const fn lower(&self) -> Money {
        self.0
    }

    #[inline]
    pub const fn upper(&self) -> Money {
        self.1
    }

    /// Checks `lower ≤ price ≤ upper`.
    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.0 <= price && price <= self.1
    }
}

impl Default for PriceRange {
    /// $0.00 to $1000.00.
    fn default() -> Self {
        PriceRange(Money::zero(), Money::from_dollars(1000))
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Active catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterState {
    /// Allowed categories; empty means no restriction.
    #[serde(default)]
    pub category: BTreeSet<String>,

    #[serde(default)]
    pub price_range: PriceRange,

    /// Minimum rating threshold.
    #[serde(default)]
    pub rating: Rating,
}

impl FilterState {
    /// Shallow merge: fields present in `patch` replace the current ones.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
    }

    /// Checks the category, price and rating conditions (not the query).
    pub fn matches(&self, product: &Product) -> bool {
        (self.category.is_empty() || self.category.contains(&product.category))
            && self.price_range.contains(product.price)
            && product.rating >= self.rating
    }
}

/// Partial update for [`FilterState`]; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterPatch {
    #[serde(default)]
    pub category: Option<BTreeSet<String>>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub rating: Option<Rating>,
}

// =============================================================================
// Sorting
// =============================================================================

/// Ordering of the marketplace listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    /// Cheapest first.
    Price,
    /// Best rated first.
    #[default]
    Rating,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Price => write!(f, "price"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!(
                "Unknown sort key: '{}'. Valid options: price, rating",
                other
            )),
        }
    }
}

// =============================================================================
// Filtered & Sorted Listing
// =============================================================================

/// Returns the products matching `filters` and `search_query`, sorted by
/// `sort`.
///
/// The sort is stable: products with equal keys keep their input order.
///
/// ## Example
/// ```rust,ignore
/// let listing = filtered_and_sorted(&catalog, &filters, "head", SortKey::Price);
/// ```
pub fn filtered_and_sorted<'a>(
    products: &'a [Product],
    filters: &FilterState,
    search_query: &str,
    sort: SortKey,
) -> Vec<&'a Product> {
    let needle = search_query.to_lowercase();

    let mut listing: Vec<&Product> = products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .filter(|p| filters.matches(p))
        .collect();

    // slice::sort_by_key is stable
    match sort {
        SortKey::Price => listing.sort_by_key(|p| p.price),
        SortKey::Rating => listing.sort_by_key(|p| std::cmp::Reverse(p.rating)),
    }

    listing
}

// =============================================================================
// Unit Tests
// =============================================================================
