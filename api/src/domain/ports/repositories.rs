//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., SeaORM).

use async_trait::async_trait;

use crate::domain::entities::{NewProduct, Product, ProductId, ProductUpdate};
use crate::error::DomainError;

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// All products, oldest first
    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;

    /// Create a new product, stamping `created_at` and `updated_at`
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Merge `update` into an existing product.
    /// Returns `None` when the product does not exist.
    async fn update(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DomainError>;

    /// Delete a product. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError>;
}
