//! # Repository Module
//!
//! SQLite implementations of the `storefront-core` ports.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CreateOrderService                                                    │
//! │       │  products.find_all_by_id(&requested)   (port, StoreResult)     │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_ids(&self, ids)          ◄── inherent, DbResult            │
//! │  ├── set_quantities(&self, updates)                                    │
//! │  └── insert(&self, name, price, qty)                                   │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository has inherent methods returning [`crate::DbResult`] and a
//! thin port impl that delegates to them. The inherent names differ from
//! the port names so method resolution is never ambiguous.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`] - Customer lookup and registration
//! - [`ProductRepository`] - Catalog lookup, registration and stock levels
//! - [`OrderRepository`] - Orders with their line items

pub mod customer;
pub mod order;
pub mod product;

pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
