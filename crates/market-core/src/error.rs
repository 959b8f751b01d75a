//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── CoreError        - Umbrella for the two below                     │
//! │  ├── ValidationError  - Input validation failures (boundary)           │
//! │  └── PersistError     - Snapshot encode/decode + sink failures         │
//! │                                                                         │
//! │  market-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures → PersistError     │
//! │                                                                         │
//! │  shopper app errors                                                    │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, store name, etc.)
//! 3. Store operations never fail: persistence problems are reported as
//!    [`crate::store::Persistence::Failed`], not as `Err`

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for callers that deal with both validation and persistence.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence error (wraps PersistError).
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Raised at the boundary, before any store operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., card digits, email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Persist Error
// =============================================================================

/// Failures while loading or writing a state snapshot.
///
/// ## When This Occurs
/// - The snapshot text is not valid JSON for `StoreState`
/// - The sink cannot be reached (database closed, lock poisoned, disk full)
///
/// In-memory state stays authoritative for the session either way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// State could not be serialized.
    #[error("Failed to encode snapshot '{name}': {reason}")]
    Encode { name: String, reason: String },

    /// Stored snapshot could not be parsed.
    #[error("Failed to decode snapshot '{name}': {reason}")]
    Decode { name: String, reason: String },

    /// The durable storage behind the sink is unavailable.
    #[error("Snapshot storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for snapshot sink results.
pub type PersistResult<T> = Result<T, PersistError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "street".to_string(),
        };
        assert_eq!(err.to_string(), "street is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_persist_error_messages() {
        let err = PersistError::Decode {
            name: "marketplace-store".to_string(),
            reason: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode snapshot 'marketplace-store': expected value"
        );
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = PersistError::Unavailable("closed".to_string()).into();
        assert!(matches!(core_err, CoreError::Persist(_)));
    }
}
