//! # storefront-core: Domain and Use Cases for the Storefront
//!
//! This crate holds the business side of order placement: the domain types,
//! integer money, validation rules, the pure order planner, the repository
//! traits the use cases depend on, and the use-case services themselves.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Binaries (seed, place-order)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ services │─►│ planning │  │  types   │  │  validation  │   │   │
//! │  │   │ (orders) │  │OrderPlan │  │  money   │  │    rules     │   │   │
//! │  │   └────┬─────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │        │ ports (traits)                                         │   │
//! │  └────────┼────────────────────────────────────────────────────────┘   │
//! │           │                                                             │
//! │  ┌────────▼────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-db (SQLite repositories)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, line items)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`planning`] - Pure existence/stock checks and line pricing
//! - [`ports`] - Repository traits implemented by the storage layer
//! - [`services`] - Use cases (create order, find order, register catalog data)
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1099); // $10.99
//! let line_total = price.multiply_quantity(3);
//!
//! assert_eq!(line_total.cents(), 3297);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod planning;
pub mod ports;
pub mod services;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use money::Money;
pub use planning::OrderPlan;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of customer and product names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Largest unit price: 99,999,999.99, the range of a `decimal(10,2)` price.
pub const MAX_PRICE_CENTS: i64 = 9_999_999_999;
