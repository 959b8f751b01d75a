//! # Snapshot Codec
//!
//! JSON text encoding of [`StoreState`], shared by every snapshot sink.
//!
//! Decoding is lenient about missing top-level keys (they default) and
//! strict about malformed ones.

use crate::error::{PersistError, PersistResult};
use crate::state::StoreState;

/// Default name the shopping state is stored under.
pub const STORE_NAME: &str = "marketplace-store";

/// Serializes the state for the snapshot called `name`.
pub fn encode(name: &str, state: &StoreState) -> PersistResult<String> {
    serde_json::to_string(state).map_err(|e| PersistError::Encode {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a stored snapshot.
///
/// ## Example
/// ```rust
/// use market_core::snapshot::decode;
///
/// let state = decode("marketplace-store", r#"{"searchQuery":"lamp"}"#).unwrap();
/// assert_eq!(state.search_query(), "lamp");
/// assert!(state.cart().is_empty());
/// ```
pub fn decode(name: &str, payload: &str) -> PersistResult<StoreState> {
    serde_json::from_str(payload).map_err(|e| PersistError::Decode {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
