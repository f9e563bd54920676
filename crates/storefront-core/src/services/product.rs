//! # Product Registration

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CoreResult, ValidationError};
use crate::ports::ProductRepository;
use crate::types::Product;
use crate::validation::{validate_name, validate_price_cents, validate_stock_quantity};

/// Adds a product with a unique name to the catalog.
pub struct CreateProductService {
    products: Arc<dyn ProductRepository>,
}

impl CreateProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        CreateProductService { products }
    }

    /// Creates the product.
    ///
    /// ## Errors
    /// - [`ValidationError::Duplicate`] if a product already has this name
    /// - other [`ValidationError`]s for an empty name, negative price or
    ///   negative quantity
    pub async fn execute(&self, name: &str, price_cents: i64, quantity: i64) -> CoreResult<Product> {
        let name = name.trim();

        validate_name(name)?;
        validate_price_cents(price_cents)?;
        validate_stock_quantity(quantity)?;

        debug!(name = %name, price_cents, quantity, "Registering product");

        if self.products.find_by_name(name).await?.is_some() {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: name.to_string(),
            }
            .into());
        }

        let product = self.products.create(name, price_cents, quantity).await?;

        info!(product_id = %product.id, "Product registered");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::services::testing::InMemoryStore;

    #[tokio::test]
    async fn test_registers_product() {
        let store = InMemoryStore::with_customer("C1");
        let service = CreateProductService::new(store.clone());

        let product = service.execute("Desk Lamp", 2450, 12).await.unwrap();

        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price().cents(), 2450);
        assert_eq!(store.product_quantity(&product.id), Some(12));
    }

    #[tokio::test]
    async fn test_rejects_duplicate_name() {
        let store = InMemoryStore::with_customer("C1");
        store.add_product("P1", 1000, 1);
        let service = CreateProductService::new(store);

        let err = service.execute("Product P1", 500, 1).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref field, .. }) if field == "name"
        ));
    }

    #[tokio::test]
    async fn test_rejects_negative_values() {
        let store = InMemoryStore::with_customer("C1");
        let service = CreateProductService::new(store);

        assert!(service.execute("Lamp", -1, 1).await.is_err());
        assert!(service.execute("Lamp", 100, -1).await.is_err());
        assert!(service.execute("Lamp", 0, 0).await.is_ok());
    }
}
