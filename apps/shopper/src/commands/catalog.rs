//! # Catalog Commands
//!
//! Browsing the catalog through the stored filters and search query, plus
//! the recently viewed history.
//!
//! ## Available Commands
//! - `browse`: Filtered, sorted listing
//! - `view_product`: Product details; records the view
//! - `get_recently_viewed`: Most recent views first
//! - `update_filters`: Merge a partial filter update
//! - `set_search_query`: Replace the title search

use market_core::validation::{validate_price_range, validate_search_query};
use market_core::{FilterPatch, FilterState, Product, SortKey};
use serde::Serialize;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// One page of the marketplace listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub products: Vec<Product>,
    pub total: usize,
    pub filters: FilterState,
    pub search_query: String,
    pub sort: SortKey,
}

/// Lists catalog products matching the stored filters and query.
///
/// `sort` is "price" or "rating"; when absent the configured default is used.
pub async fn browse(session: &SessionState, sort: Option<&str>) -> Result<CommandResponse<BrowseResponse>, ApiError> {
    let sort = match sort {
        Some(raw) => raw.parse::<SortKey>().map_err(ApiError::bad_request)?,
        None => session.default_sort(),
    };

    let store = session.store().await;
    let products: Vec<Product> = store
        .browse(session.catalog().products(), sort)
        .into_iter()
        .cloned()
        .collect();

    Ok(CommandResponse::read(BrowseResponse {
        total: products.len(),
        products,
        filters: store.state().filters().clone(),
        search_query: store.state().search_query().to_string(),
        sort,
    }))
}

/// Returns a product and moves it to the front of the recently viewed list.
pub async fn view_product(session: &SessionState, product_id: &str) -> Result<CommandResponse<Product>, ApiError> {
    let product = session
        .catalog()
        .find(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let mut store = session.store().await;
    let persistence = store.add_to_recently_viewed(product.clone()).await;
    Ok(CommandResponse::written(product, persistence))
}

pub async fn get_recently_viewed(session: &SessionState) -> CommandResponse<Vec<Product>> {
    let store = session.store().await;
    CommandResponse::read(store.state().recently_viewed().products().to_vec())
}

/// Merges `patch` into the stored filters.
///
/// Inverted or negative price ranges are rejected here; the store itself
/// would keep them and match nothing. Ratings above five stars never get
/// this far, `Rating` refuses them while the request is parsed.
pub async fn update_filters(
    session: &SessionState,
    patch: FilterPatch,
) -> Result<CommandResponse<FilterState>, ApiError> {
    if let Some(range) = &patch.price_range {
        validate_price_range(range)?;
    }

    let mut store = session.store().await;
    let persistence = store.update_filters(patch).await;
    Ok(CommandResponse::written(store.state().filters().clone(), persistence))
}

pub async fn set_search_query(session: &SessionState, query: String) -> Result<CommandResponse<String>, ApiError> {
    validate_search_query(&query)?;

    let mut store = session.store().await;
    let persistence = store.set_search_query(query).await;
    Ok(CommandResponse::written(
        store.state().search_query().to_string(),
        persistence,
    ))
}
