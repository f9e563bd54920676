//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Batch lookup by ID for order placement
//! - Registration with a unique name
//! - Stock level updates after an order
//!
//! ## Batch Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Requested: [P1 x2, P9 x1, P1 x3]                                      │
//! │       │                                                                 │
//! │       ▼  distinct IDs                                                   │
//! │  SELECT ... FROM products WHERE id IN (?, ?)     ← one round trip      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Found: [P1]          (P9 is simply absent)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use storefront_core::ports::{self, StoreResult};
use storefront_core::{OrderProductRequest, Product, StockUpdate};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, quantity, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.insert("Desk Lamp", 2450, 12).await?;
/// let found = repo.get_by_ids(&[product.id.clone()]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets every existing product among `ids` in a single query.
    ///
    /// Duplicate IDs are looked up once. Missing IDs are absent from the
    /// result; the caller decides what that means.
    pub async fn get_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        let distinct: BTreeSet<&str> = ids.iter().map(String::as_str).collect();

        if distinct.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = distinct.len(), "Batch product lookup");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in distinct {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(found = products.len(), "Batch lookup returned products");
        Ok(products)
    }

    /// Gets a product by name (exact match).
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product with a generated ID.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - Name already in the catalog
    /// * `DbError::QueryFailed` - Negative price or quantity (CHECK constraint)
    pub async fn insert(&self, name: &str, price_cents: i64, quantity: i64) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents,
            quantity,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: name.to_string(),
            },
            other => other,
        })?;

        Ok(product)
    }

    /// Sets absolute stock levels, all or nothing.
    ///
    /// Updates apply in order, so a later entry for the same product wins.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - A listed product doesn't exist (nothing is written)
    /// * `DbError::QueryFailed` - A negative quantity (CHECK constraint)
    pub async fn set_quantities(&self, updates: &[StockUpdate]) -> DbResult<()> {
        if updates.is_empty() {
            return Ok(());
        }

        debug!(count = updates.len(), "Updating stock levels");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = ?1, updated_at = ?2
                WHERE id = ?3
                "#,
            )
            .bind(update.quantity)
            .bind(now)
            .bind(&update.id)
            .execute(&mut *tx)
            .await?;

            // Dropping the transaction rolls back earlier updates.
            if result.rows_affected() == 0 {
                return Err(DbError::not_found("Product", &update.id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ports::ProductRepository for ProductRepository {
    async fn find_all_by_id(
        &self,
        products: &[OrderProductRequest],
    ) -> StoreResult<Option<Vec<Product>>> {
        let ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        Ok(Some(self.get_by_ids(&ids).await?))
    }

    async fn update_quantity(&self, updates: &[StockUpdate]) -> StoreResult<()> {
        Ok(self.set_quantities(updates).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        Ok(self.get_by_name(name).await?)
    }

    async fn create(&self, name: &str, price_cents: i64, quantity: i64) -> StoreResult<Product> {
        Ok(self.insert(name, price_cents, quantity).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
