//! # Order Services
//!
//! ## Create Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  execute(customer_id, products)                                         │
//! │       │                                                                 │
//! │       ├── 0. validate request shape ─────────────► Validation           │
//! │       ├── 1. customers.find_by_id ───────────────► CustomerNotFound     │
//! │       ├── 2. products.find_all_by_id ────────────► ProductLookupFailed  │
//! │       ├── 3-5. OrderPlan::build ─────────────────► ProductNotFound      │
//! │       │                                            InsufficientStock    │
//! │       │   (nothing written up to here)                                  │
//! │       ├── 6. orders.create(customer, priced lines)                      │
//! │       ├── 7-8. products.update_quantity(snapshot qty − requested)       │
//! │       └── 9. return the created order                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 6 and 8 are separate repository calls. If the stock update fails
//! the order stays persisted and the error is returned; nothing is rolled
//! back here.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::planning::OrderPlan;
use crate::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::types::{NewOrder, Order, OrderProductRequest};
use crate::validation::{validate_id, validate_order_request};

// =============================================================================
// Create Order
// =============================================================================

/// Places an order for an existing customer.
pub struct CreateOrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl CreateOrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        CreateOrderService {
            orders,
            products,
            customers,
        }
    }

    /// Validates the request against the catalog, persists the order and
    /// writes back the decremented stock.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] for an empty customer ID, no lines, or a
    ///   non-positive quantity
    /// - [`CoreError::CustomerNotFound`]
    /// - [`CoreError::ProductLookupFailed`]
    /// - [`CoreError::ProductNotFound`] naming the first missing product
    /// - [`CoreError::InsufficientStock`] naming the first short line
    /// - [`CoreError::Store`] for any repository fault, unchanged
    pub async fn execute(
        &self,
        customer_id: &str,
        products: &[OrderProductRequest],
    ) -> CoreResult<Order> {
        debug!(customer_id = %customer_id, lines = products.len(), "Creating order");

        if let Err(e) = validate_order_request(customer_id, products) {
            warn!(customer_id = %customer_id, error = %e, "Rejected order request");
            return Err(e.into());
        }

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

        let catalog = self
            .products
            .find_all_by_id(products)
            .await?
            .ok_or(CoreError::ProductLookupFailed)?;

        let plan = match OrderPlan::build(products, &catalog) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(customer_id = %customer_id, error = %e, "Order failed catalog checks");
                return Err(e);
            }
        };

        let order = self
            .orders
            .create(NewOrder {
                customer,
                products: plan.lines,
            })
            .await?;

        debug!(order_id = %order.id, updates = plan.stock_updates.len(), "Writing stock levels");
        self.products.update_quantity(&plan.stock_updates).await?;

        info!(
            order_id = %order.id,
            customer_id = %customer_id,
            lines = order.products.len(),
            total = %order.total(),
            "Order created"
        );

        Ok(order)
    }
}

// =============================================================================
// Find Order
// =============================================================================

/// Reads back a placed order.
pub struct FindOrderService {
    orders: Arc<dyn OrderRepository>,
}

impl FindOrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        FindOrderService { orders }
    }

    pub async fn execute(&self, order_id: &str) -> CoreResult<Order> {
        validate_id("order_id", order_id)?;

        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStore;
    use crate::types::StockUpdate;

    fn service(store: &Arc<InMemoryStore>) -> CreateOrderService {
        CreateOrderService::new(store.clone(), store.clone(), store.clone())
    }

    fn line(id: &str, quantity: i64) -> OrderProductRequest {
        OrderProductRequest::new(id, quantity)
    }

    #[tokio::test]
    async fn test_happy_path() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);

        let order = service(&store).execute("C1", &[line("P1", 2)]).await.unwrap();

        assert_eq!(order.customer.id, "C1");
        assert_eq!(order.products.len(), 1);
        assert_eq!(order.products[0].product_id.as_deref(), Some("P1"));
        assert_eq!(order.products[0].quantity, 2);
        assert_eq!(order.products[0].price_cents, 1000);
        assert_eq!(order.total().cents(), 2000);

        assert_eq!(
            store.stock_writes(),
            vec![vec![StockUpdate {
                id: "P1".to_string(),
                quantity: 3,
            }]]
        );
        assert_eq!(store.product_quantity("P1"), Some(3));
    }

    #[tokio::test]
    async fn test_unknown_customer_touches_nothing_else() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);

        let err = service(&store)
            .execute("C404", &[line("P1", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::CustomerNotFound(ref id) if id == "C404"));
        assert_eq!(store.product_lookups(), 0);
        assert_eq!(store.order_count(), 0);
        assert!(store.stock_writes().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);

        let err = service(&store)
            .execute("C1", &[line("P2", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(ref id) if id == "P2"));
        assert_eq!(store.order_count(), 0);
        assert!(store.stock_writes().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_stock() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 1);

        let err = service(&store)
            .execute("C1", &[line("P1", 3)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock { ref product_id, available: 1, requested: 3 } if product_id == "P1"
        ));
        assert_eq!(store.order_count(), 0);
        assert!(store.stock_writes().is_empty());
        assert_eq!(store.product_quantity("P1"), Some(1));
    }

    #[tokio::test]
    async fn test_mixed_validity_reports_first_missing() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);

        let err = service(&store)
            .execute("C1", &[line("P1", 1), line("P7", 1), line("P8", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(ref id) if id == "P7"));
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_signal() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);
        store.fail_product_lookup();

        let err = service(&store)
            .execute("C1", &[line("P1", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductLookupFailed));
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_lookups() {
        let store = InMemoryStore::with_customer("C1");

        let err = service(&store).execute("C1", &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = service(&store)
            .execute("C1", &[line("P1", 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        assert_eq!(store.customer_lookups(), 0);
        assert_eq!(store.product_lookups(), 0);
    }

    #[tokio::test]
    async fn test_price_is_frozen_at_lookup() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);
        store.reprice_after_lookup("P1", 9999);

        let order = service(&store).execute("C1", &[line("P1", 2)]).await.unwrap();

        assert_eq!(order.products[0].price_cents, 1000);
        assert_eq!(store.product_price("P1"), Some(9999));
    }

    #[tokio::test]
    async fn test_repeated_orders_decrement_cumulatively() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);
        let service = service(&store);

        let first = service.execute("C1", &[line("P1", 2)]).await.unwrap();
        let second = service.execute("C1", &[line("P1", 2)]).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.product_quantity("P1"), Some(1));

        let err = service.execute("C1", &[line("P1", 2)]).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 1, .. }));
        assert_eq!(store.order_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_lines_use_one_snapshot() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 3);

        let order = service(&store)
            .execute("C1", &[line("P1", 2), line("P1", 2)])
            .await
            .unwrap();

        assert_eq!(order.products.len(), 2);
        // Both updates are computed from the pre-order quantity.
        assert_eq!(store.product_quantity("P1"), Some(1));
    }

    #[tokio::test]
    async fn test_failed_stock_write_keeps_order() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);
        store.fail_stock_update();

        let err = service(&store)
            .execute("C1", &[line("P1", 2)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Store(_)));
        assert_eq!(store.order_count(), 1);
        assert_eq!(store.product_quantity("P1"), Some(5));
    }

    #[tokio::test]
    async fn test_total_past_i64_saturates() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", crate::MAX_PRICE_CENTS, 2_000_000_000);

        let order = service(&store)
            .execute("C1", &[line("P1", 1_000_000_000), line("P1", 1)])
            .await
            .unwrap();

        assert_eq!(order.total().cents(), i64::MAX);
        assert_eq!(order.products[1].line_total().cents(), crate::MAX_PRICE_CENTS);
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn test_find_order() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 5);
        let created = service(&store).execute("C1", &[line("P1", 1)]).await.unwrap();

        let finder = FindOrderService::new(store.clone());
        let found = finder.execute(&created.id).await.unwrap();
        assert_eq!(found, created);

        let err = finder.execute("missing").await.unwrap_err();
        assert!(matches!(err, CoreError::OrderNotFound(ref id) if id == "missing"));
    }
}
