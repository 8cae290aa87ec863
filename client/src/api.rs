//! The catalog API as seen by the views

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DeleteReport, NewProduct, Product, ProductPatch};

/// Operations the views need from the backend
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn get_product(&self, id: &str) -> Result<Product>;

    async fn add_product(&self, product: &NewProduct) -> Result<Product>;

    /// Send a partial update and return the merged record
    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product>;

    async fn delete_product(&self, id: &str) -> Result<DeleteReport>;

    /// Absolute URL for a stored image path such as `/uploads/1.png`
    fn image_url(&self, path: &str) -> String;
}
