//! # Use-Case Services
//!
//! Each service wires a use case to the repository ports it needs. Services
//! are constructed once with `Arc<dyn Repository>` handles and are cheap to
//! share between tasks.
//!
//! - [`order::CreateOrderService`] - validate, price and place an order
//! - [`order::FindOrderService`] - read back a placed order
//! - [`customer::CreateCustomerService`] - register a customer
//! - [`product::CreateProductService`] - add a product to the catalog

pub mod customer;
pub mod order;
pub mod product;

#[cfg(test)]
pub(crate) mod testing;

pub use customer::CreateCustomerService;
pub use order::{CreateOrderService, FindOrderService};
pub use product::CreateProductService;
