//! # Order Planning
//!
//! Turns a validated request plus the catalog snapshot into the two writes
//! an order needs: the priced lines and the new stock levels.
//!
//! ## Pipeline
//! ```text
//! requested lines ─┐
//!                  ├─► every id present? ──► ProductNotFound(first missing)
//! catalog snapshot ┘          │
//!                             ▼
//!                  every line in stock? ───► InsufficientStock(first short)
//!                             │
//!                             ▼
//!                  PricedLine per line (price frozen from snapshot)
//!                  StockUpdate per line (snapshot qty − requested qty)
//! ```
//!
//! Everything here works line by line in request order. A product that
//! appears on two lines is checked twice against the same snapshot quantity
//! and gets two stock updates; the later one wins when they are applied.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::types::{OrderProductRequest, PricedLine, Product, StockUpdate};

/// The computed writes for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    /// One priced line per requested line, in request order.
    pub lines: Vec<PricedLine>,
    /// One stock update per requested line, in request order.
    pub stock_updates: Vec<StockUpdate>,
}

impl OrderPlan {
    /// Checks existence and stock and prices every requested line.
    ///
    /// `catalog` is whatever the product repository returned for the
    /// requested IDs; it may be partial and may come in any order.
    ///
    /// ## Errors
    /// - [`CoreError::ProductNotFound`] for the first requested ID absent
    ///   from `catalog`
    /// - [`CoreError::InsufficientStock`] for the first line asking for more
    ///   than the snapshot quantity
    pub fn build(requested: &[OrderProductRequest], catalog: &[Product]) -> CoreResult<Self> {
        let known: HashSet<&str> = catalog.iter().map(|p| p.id.as_str()).collect();

        if let Some(missing) = requested.iter().find(|line| !known.contains(line.id.as_str())) {
            return Err(CoreError::ProductNotFound(missing.id.clone()));
        }

        // First record wins if a repository returns an ID twice.
        let mut by_id: HashMap<&str, &Product> = HashMap::with_capacity(catalog.len());
        for product in catalog {
            by_id.entry(product.id.as_str()).or_insert(product);
        }

        let short = requested.iter().find_map(|line| {
            by_id
                .get(line.id.as_str())
                .filter(|product| !product.has_stock_for(line.quantity))
                .map(|product| (line, product.quantity))
        });

        if let Some((line, available)) = short {
            return Err(CoreError::InsufficientStock {
                product_id: line.id.clone(),
                available,
                requested: line.quantity,
            });
        }

        let lines = requested
            .iter()
            .map(|line| PricedLine {
                product_id: line.id.clone(),
                quantity: line.quantity,
                // Zero if absent from the snapshot.
                price_cents: by_id.get(line.id.as_str()).map_or(0, |p| p.price_cents),
            })
            .collect();

        let stock_updates = requested
            .iter()
            .map(|line| StockUpdate {
                id: line.id.clone(),
                quantity: by_id.get(line.id.as_str()).map_or(0, |p| p.quantity) - line.quantity,
            })
            .collect();

        Ok(OrderPlan {
            lines,
            stock_updates,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
