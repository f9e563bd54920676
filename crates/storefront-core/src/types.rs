//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  customer       │       │
//! │  │  email          │   │  price_cents    │   │  products ──────┼──┐    │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘  │    │
//! │                        └─────────────────┘                        │    │
//! │                                                                   ▼    │
//! │  OrderProductRequest ──► PricedLine ──► OrderProduct                   │
//! │  { id, quantity }        { + price }    (orders_products row)          │
//! │  (ephemeral)             (frozen)       id, order_id, product_id,      │
//! │                                         price_cents, quantity          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. Only existence matters when placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email, unique across customers.
    pub email: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across the catalog.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units available for new orders.
    pub quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether `requested` units can be taken from current stock.
    #[inline]
    pub fn has_stock_for(&self, requested: i64) -> bool {
        requested <= self.quantity
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// One requested line of an incoming order: which product and how many.
///
/// Not persisted. Product IDs may repeat across lines; each line is
/// validated and priced on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderProductRequest {
    /// Product ID.
    pub id: String,

    /// Requested quantity (must be positive).
    pub quantity: i64,
}

impl OrderProductRequest {
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        OrderProductRequest {
            id: id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Priced Line
// =============================================================================

/// A requested line with the unit price frozen from the catalog.
///
/// Uses the snapshot pattern: later catalog price changes do not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedLine {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents at the time of ordering.
    pub price_cents: i64,
}

impl PricedLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }
}

/// Everything the order repository needs to persist a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub products: Vec<PricedLine>,
}

// =============================================================================
// Order
// =============================================================================

/// A persisted line item (`orders_products` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderProduct {
    pub id: String,
    pub order_id: String,
    /// Cleared when the product is deleted from the catalog.
    pub product_id: Option<String>,
    /// Unit price in cents at the time of ordering.
    pub price_cents: i64,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl OrderProduct {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_cents).multiply_quantity(self.quantity)
    }
}

/// A placed order with its customer and line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub products: Vec<OrderProduct>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.products.iter().map(OrderProduct::line_total).sum()
    }
}

// =============================================================================
// Stock Update
// =============================================================================

/// New absolute stock level for a product after an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockUpdate {
    pub id: String,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "P1".to_string(),
            name: "Keyboard".to_string(),
            price_cents: 1000,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_has_stock_for() {
        let p = product(5);
        assert!(p.has_stock_for(5));
        assert!(p.has_stock_for(1));
        assert!(!p.has_stock_for(6));
    }

    #[test]
    fn test_priced_line_total() {
        let line = PricedLine {
            product_id: "P1".to_string(),
            quantity: 3,
            price_cents: 250,
        };
        assert_eq!(line.line_total().cents(), 750);
    }

    #[test]
    fn test_order_total() {
        let now = Utc::now();
        let customer = Customer {
            id: "C1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: now,
            updated_at: now,
        };
        let line = |price_cents, quantity| OrderProduct {
            id: "L".to_string(),
            order_id: "O1".to_string(),
            product_id: Some("P1".to_string()),
            price_cents,
            quantity,
            created_at: now,
            updated_at: now,
        };
        let order = Order {
            id: "O1".to_string(),
            customer,
            products: vec![line(1000, 2), line(199, 1)],
            created_at: now,
            updated_at: now,
        };

        assert_eq!(order.total().cents(), 2199);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customer"]["email"], "ada@example.com");
        assert_eq!(json["products"][1]["price_cents"], 199);
        assert_eq!(json["products"][0]["product_id"], "P1");
    }

    #[test]
    fn test_request_deserializes() {
        let requested: Vec<OrderProductRequest> =
            serde_json::from_str(r#"[{"id":"P1","quantity":2},{"id":"P2","quantity":1}]"#).unwrap();

        assert_eq!(
            requested,
            vec![OrderProductRequest::new("P1", 2), OrderProductRequest::new("P2", 1)]
        );
    }
}
