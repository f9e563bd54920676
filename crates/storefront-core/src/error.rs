//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Use-case failures                              │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Opaque wrapper around a repository's error     │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError::Store → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending identifier in the message
//! 3. Errors are enum variants, never String
//! 4. Storage faults are carried through untouched

use std::error::Error as StdError;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Use-case errors.
///
/// Everything except [`CoreError::Store`] is caused by the request itself
/// and should be reported back to the caller as-is. None of them is retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No customer with the requested ID.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The product repository could not perform the batch lookup at all.
    ///
    /// An empty or partial result is NOT this error; missing products are
    /// reported individually through [`CoreError::ProductNotFound`].
    #[error("Cannot find products with given ids")]
    ProductLookupFailed,

    /// A requested product does not exist in the catalog.
    ///
    /// Only the first missing product, in request order, is reported.
    #[error("Could not find product {0}")]
    ProductNotFound(String),

    /// A requested quantity exceeds what is in stock.
    ///
    /// ## When This Occurs
    /// ```text
    /// Request: { product: P1, quantity: 3 }
    ///      │
    ///      ▼
    /// Catalog: P1 has quantity 1
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "P1", available: 1, requested: 3 }
    /// ```
    /// Only the first offending line, in request order, is reported.
    #[error("Invalid quantity for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// No order with the requested ID.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A repository failed. The underlying error is preserved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Whether the error was caused by the request rather than by storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::Store(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any repository is touched.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Boxed error type produced by repository implementations.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error raised by a repository implementation.
///
/// The core does not know which storage is behind the ports, so it keeps the
/// implementation's error boxed. Callers that know the concrete type can get
/// it back with [`StoreError::downcast_ref`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(#[from] BoxError);

impl StoreError {
    /// Wraps any error as a StoreError.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        StoreError(Box::new(err))
    }

    /// Returns the wrapped error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "P1".to_string(),
            available: 1,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid quantity for P1: available 1, requested 3"
        );

        let err = CoreError::ProductNotFound("P2".to_string());
        assert_eq!(err.to_string(), "Could not find product P2");

        let err = CoreError::CustomerNotFound("C9".to_string());
        assert_eq!(err.to_string(), "Customer not found: C9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id is required");

        let err = ValidationError::Duplicate {
            field: "email".to_string(),
            value: "a@b.io".to_string(),
        };
        assert_eq!(err.to_string(), "email 'a@b.io' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "products".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_client_error());
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: CoreError = StoreError::new(DiskError).into();

        assert_eq!(err.to_string(), "disk on fire");
        assert!(!err.is_client_error());

        match err {
            CoreError::Store(store) => assert!(store.downcast_ref::<DiskError>().is_some()),
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
