//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_order(NewOrder)                                                │
//! │     │                                                                   │
//! │     ├── BEGIN                                                           │
//! │     ├── INSERT INTO orders           (id, customer_id)                  │
//! │     ├── INSERT INTO orders_products  (one row per priced line,          │
//! │     │                                 in request order)                 │
//! │     └── COMMIT                       ← header and lines land together   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items outlive their order and product: deleting either clears the
//! reference (`ON DELETE SET NULL`) instead of removing the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use storefront_core::ports::{self, StoreResult};
use storefront_core::{Customer, NewOrder, Order, OrderProduct};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Order header joined with its customer.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_id: String,
    customer_name: String,
    customer_email: String,
    customer_created_at: DateTime<Utc>,
    customer_updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, products: Vec<OrderProduct>) -> Order {
        Order {
            id: self.id,
            customer: Customer {
                id: self.customer_id,
                name: self.customer_name,
                email: self.customer_email,
                created_at: self.customer_created_at,
                updated_at: self.customer_updated_at,
            },
            products,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderProductRow {
    id: String,
    product_id: Option<String>,
    price_cents: i64,
    quantity: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts the order header and every line item in one transaction.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - Unknown customer or product
    ///   (nothing is written)
    /// * `DbError::TransactionFailed` - Commit failed
    pub async fn insert_order(&self, order: NewOrder) -> DbResult<Order> {
        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();

        debug!(
            id = %order_id,
            customer_id = %order.customer.id,
            lines = order.products.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&order_id)
        .bind(&order.customer.id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.products.len());

        for line in order.products {
            let item = OrderProduct {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: Some(line.product_id),
                price_cents: line.price_cents,
                quantity: line.quantity,
                created_at: now,
                updated_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO orders_products (
                    id, order_id, product_id, price_cents, quantity,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.price_cents)
            .bind(item.quantity)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(Order {
            id: order_id,
            customer: order.customer,
            products: items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets an order with its customer and line items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                o.id,
                o.created_at,
                o.updated_at,
                c.id AS customer_id,
                c.name AS customer_name,
                c.email AS customer_email,
                c.created_at AS customer_created_at,
                c.updated_at AS customer_updated_at
            FROM orders o
            INNER JOIN customers c ON c.id = o.customer_id
            WHERE o.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.get_items(&row.id).await?;
        Ok(Some(row.into_order(items)))
    }

    /// Gets the line items of an order, in the order they were placed.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderProduct>> {
        let rows = sqlx::query_as::<_, OrderProductRow>(
            r#"
            SELECT id, product_id, price_cents, quantity, created_at, updated_at
            FROM orders_products
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OrderProduct {
                id: row.id,
                order_id: order_id.to_string(),
                product_id: row.product_id,
                price_cents: row.price_cents,
                quantity: row.quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ports::OrderRepository for OrderRepository {
    async fn create(&self, order: NewOrder) -> StoreResult<Order> {
        Ok(self.insert_order(order).await?)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.get_by_id(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use storefront_core::{PricedLine, Product};

    struct Fixture {
        db: Database,
        customer: Customer,
        lamp: Product,
        desk: Product,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db.customers().insert("Ada", "ada@example.com").await.unwrap();
        let lamp = db.products().insert("Lamp", 1000, 5).await.unwrap();
        let desk = db.products().insert("Desk", 25000, 2).await.unwrap();
        Fixture {
            db,
            customer,
            lamp,
            desk,
        }
    }

    fn line(product: &Product, quantity: i64) -> PricedLine {
        PricedLine {
            product_id: product.id.clone(),
            quantity,
            price_cents: product.price_cents,
        }
    }

    async fn line_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders_products")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_order() {
        let f = fixture().await;
        let repo = f.db.orders();

        let created = repo
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.desk, 1), line(&f.lamp, 2)],
            })
            .await
            .unwrap();

        let loaded = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(loaded.customer.id, f.customer.id);
        assert_eq!(loaded.products.len(), 2);
        assert_eq!(loaded.products[0].product_id.as_deref(), Some(f.desk.id.as_str()));
        assert_eq!(loaded.products[1].product_id.as_deref(), Some(f.lamp.id.as_str()));
        assert_eq!(loaded.products[1].quantity, 2);
        assert!(loaded.products.iter().all(|p| p.order_id == created.id));
        assert_eq!(loaded.total().cents(), 27000);

        let ids: Vec<&str> = created.products.iter().map(|p| p.id.as_str()).collect();
        let loaded_ids: Vec<&str> = loaded.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, loaded_ids);
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let f = fixture().await;

        assert!(f.db.orders().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_line_price_is_frozen() {
        let f = fixture().await;
        let order = f
            .db
            .orders()
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.lamp, 1)],
            })
            .await
            .unwrap();

        sqlx::query("UPDATE products SET price_cents = 9999 WHERE id = ?1")
            .bind(&f.lamp.id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let loaded = f.db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.products[0].price_cents, 1000);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_foreign_key_violation() {
        let f = fixture().await;
        let stranger = Customer {
            id: "not-registered".to_string(),
            ..f.customer.clone()
        };

        let err = f
            .db
            .orders()
            .insert_order(NewOrder {
                customer: stranger,
                products: vec![line(&f.lamp, 1)],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(f.db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back_whole_order() {
        let f = fixture().await;
        let ghost = PricedLine {
            product_id: "ghost".to_string(),
            quantity: 1,
            price_cents: 100,
        };

        let err = f
            .db
            .orders()
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.lamp, 1), ghost],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(f.db.orders().count().await.unwrap(), 0);
        assert_eq!(line_count(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_deleting_product_keeps_line_item() {
        let f = fixture().await;
        let order = f
            .db
            .orders()
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.lamp, 1), line(&f.desk, 1)],
            })
            .await
            .unwrap();

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(&f.lamp.id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let loaded = f.db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.products.len(), 2);
        assert_eq!(loaded.products[0].product_id, None);
        assert_eq!(loaded.products[0].price_cents, 1000);
        assert_eq!(loaded.products[1].product_id.as_deref(), Some(f.desk.id.as_str()));
    }

    #[tokio::test]
    async fn test_deleting_order_keeps_line_items() {
        let f = fixture().await;
        let order = f
            .db
            .orders()
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.lamp, 1)],
            })
            .await
            .unwrap();

        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(&order.id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let orphaned: Option<String> =
            sqlx::query_scalar("SELECT order_id FROM orders_products WHERE id = ?1")
                .bind(&order.products[0].id)
                .fetch_one(f.db.pool())
                .await
                .unwrap();
        assert_eq!(orphaned, None);
        assert!(f.db.orders().get_by_id(&order.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_customer_with_orders_cannot_be_deleted() {
        let f = fixture().await;
        f.db.orders()
            .insert_order(NewOrder {
                customer: f.customer.clone(),
                products: vec![line(&f.lamp, 1)],
            })
            .await
            .unwrap();

        let err = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(&f.customer.id)
            .execute(f.db.pool())
            .await
            .unwrap_err();

        assert!(matches!(
            DbError::from(err),
            DbError::ForeignKeyViolation { .. }
        ));
    }
}
