//! In-memory repositories for service tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::error::StoreError;
use crate::ports::{CustomerRepository, OrderRepository, ProductRepository, StoreResult};
use crate::types::{
    Customer, NewOrder, Order, OrderProduct, OrderProductRequest, Product, StockUpdate,
};

#[derive(Debug, Error)]
#[error("in-memory store failure: {0}")]
pub(crate) struct FakeStoreError(&'static str);

#[derive(Default)]
struct State {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    customer_lookups: usize,
    product_lookups: usize,
    stock_writes: Vec<Vec<StockUpdate>>,
    fail_lookup: bool,
    fail_stock_update: bool,
    reprice: Option<(String, i64)>,
}

/// One store backing all three ports, with call counters and failure knobs.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub(crate) fn with_customer(id: &str) -> Arc<Self> {
        let store = InMemoryStore::default();
        let now = Utc::now();
        store.lock().customers.push(Customer {
            id: id.to_string(),
            name: format!("Customer {id}"),
            email: format!("{}@example.com", id.to_lowercase()),
            created_at: now,
            updated_at: now,
        });
        Arc::new(store)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("store mutex poisoned")
    }

    pub(crate) fn add_product(&self, id: &str, price_cents: i64, quantity: i64) {
        let now = Utc::now();
        self.lock().products.push(Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_cents,
            quantity,
            created_at: now,
            updated_at: now,
        });
    }

    pub(crate) fn fail_product_lookup(&self) {
        self.lock().fail_lookup = true;
    }

    pub(crate) fn fail_stock_update(&self) {
        self.lock().fail_stock_update = true;
    }

    /// Changes a catalog price right after the next batch lookup returns.
    pub(crate) fn reprice_after_lookup(&self, id: &str, price_cents: i64) {
        self.lock().reprice = Some((id.to_string(), price_cents));
    }

    pub(crate) fn customer_lookups(&self) -> usize {
        self.lock().customer_lookups
    }

    pub(crate) fn product_lookups(&self) -> usize {
        self.lock().product_lookups
    }

    pub(crate) fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub(crate) fn stock_writes(&self) -> Vec<Vec<StockUpdate>> {
        self.lock().stock_writes.clone()
    }

    pub(crate) fn product_quantity(&self, id: &str) -> Option<i64> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.quantity)
    }

    pub(crate) fn product_price(&self, id: &str) -> Option<i64> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.price_cents)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Customer>> {
        let mut state = self.lock();
        state.customer_lookups += 1;
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        Ok(self
            .lock()
            .customers
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn create(&self, name: &str, email: &str) -> StoreResult<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().customers.push(customer.clone());
        Ok(customer)
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_all_by_id(
        &self,
        products: &[OrderProductRequest],
    ) -> StoreResult<Option<Vec<Product>>> {
        let mut state = self.lock();
        state.product_lookups += 1;

        if state.fail_lookup {
            return Ok(None);
        }

        let found: Vec<Product> = state
            .products
            .iter()
            .filter(|p| products.iter().any(|req| req.id == p.id))
            .cloned()
            .collect();

        if let Some((id, price_cents)) = state.reprice.take() {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
                product.price_cents = price_cents;
            }
        }

        Ok(Some(found))
    }

    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        let mut state = self.lock();

        if state.fail_stock_update {
            return Err(StoreError::new(FakeStoreError("stock update")));
        }

        state.stock_writes.push(updates.to_vec());
        for update in updates {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == update.id) {
                product.quantity = update.quantity;
            }
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .lock()
            .products
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn create(&self, name: &str, price_cents: i64, quantity: i64) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents,
            quantity,
            created_at: now,
            updated_at: now,
        };
        self.lock().products.push(product.clone());
        Ok(product)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, order: NewOrder) -> StoreResult<Order> {
        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();

        let products = order
            .products
            .into_iter()
            .map(|line| OrderProduct {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: Some(line.product_id),
                price_cents: line.price_cents,
                quantity: line.quantity,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let created = Order {
            id: order_id,
            customer: order.customer,
            products,
            created_at: now,
            updated_at: now,
        };
        self.lock().orders.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.lock().orders.iter().find(|o| o.id == id).cloned())
    }
}
