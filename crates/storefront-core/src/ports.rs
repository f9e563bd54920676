//! # Repository Ports
//!
//! The storage operations the use cases depend on. `storefront-db`
//! implements them over SQLite; tests implement them in memory.
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────────┐
//! │ CreateOrderService   │─────►│ CustomerRepository           │
//! │ FindOrderService     │      │ ProductRepository            │
//! │ CreateCustomerService│      │ OrderRepository              │
//! │ CreateProductService │      └──────────────┬───────────────┘
//! └──────────────────────┘                     │ impl
//!                                 ┌────────────▼───────────────┐
//!                                 │ storefront-db repositories │
//!                                 └────────────────────────────┘
//! ```
//!
//! Every method returns [`StoreError`] on storage faults. Services pass it
//! through untouched as [`crate::CoreError::Store`].

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Customer, NewOrder, Order, OrderProductRequest, Product, StockUpdate};

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Customer storage.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns the customer, or `None` if no customer has this ID.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Customer>>;

    /// Returns the customer registered with this email, if any.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>>;

    /// Persists a new customer and returns it with generated fields.
    async fn create(&self, name: &str, email: &str) -> StoreResult<Customer>;
}

/// Product catalog storage.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Batch lookup of every product referenced by `products`.
    ///
    /// Returns the products that exist, in no particular order. IDs that
    /// do not exist are simply absent. `None` means the lookup itself could
    /// not be performed.
    async fn find_all_by_id(
        &self,
        products: &[OrderProductRequest],
    ) -> StoreResult<Option<Vec<Product>>>;

    /// Overwrites the available quantity of each listed product.
    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()>;

    /// Returns the product with exactly this name, if any.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>>;

    /// Persists a new product and returns it with generated fields.
    async fn create(&self, name: &str, price_cents: i64, quantity: i64) -> StoreResult<Product>;
}

/// Order storage.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order header and all its line items.
    ///
    /// The repository assigns the order ID and timestamps.
    async fn create(&self, order: NewOrder) -> StoreResult<Order>;

    /// Loads an order with its customer and line items.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Order>>;
}
