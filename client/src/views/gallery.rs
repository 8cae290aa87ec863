//! Gallery: every product with a thumbnail and per-item delete

use std::fmt::Write;

use anyhow::Result;

use super::{format_size, Notice};
use crate::api::CatalogApi;
use crate::models::Product;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

/// Product list fetched once on load
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    products: Vec<Product>,
    notice: Option<Notice>,
}

impl Gallery {
    pub async fn load(api: &dyn CatalogApi) -> Result<Self> {
        let products = api.list_products().await?;
        tracing::debug!(count = products.len(), "Loaded products");

        Ok(Self {
            products,
            notice: None,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Delete one product after `confirm` agrees
    ///
    /// On success the product is dropped from the local list without
    /// fetching the list again. Returns whether it was deleted.
    pub async fn delete<F>(&mut self, api: &dyn CatalogApi, id: &str, confirm: F) -> bool
    where
        F: FnOnce(&Product) -> bool,
    {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            self.notice = Some(Notice::Failure("Product not found".to_string()));
            return false;
        };

        if !confirm(product) {
            return false;
        }

        match api.delete_product(id).await {
            Ok(report) => {
                if !report.failed_images.is_empty() {
                    tracing::warn!(
                        "Images left behind for {}: {:?}",
                        id,
                        report.failed_images
                    );
                }
                self.products.retain(|p| p.id != id);
                self.notice = Some(Notice::Success("Product deleted successfully!".to_string()));
                true
            }
            Err(e) => {
                tracing::error!("Error deleting product {}: {:#}", id, e);
                self.notice = Some(Notice::Failure(format!("Failed to delete product: {}", e)));
                false
            }
        }
    }

    /// The pending notice, cleared once taken
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// One line per product: id, name, price, stock, size and thumbnail URL
    pub fn render(&self, api: &dyn CatalogApi) -> String {
        if self.products.is_empty() {
            return "No products found.\n".to_string();
        }

        let mut out = String::new();
        for product in &self.products {
            let thumbnail = product
                .images
                .first()
                .map(|path| api.image_url(path))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{}  {}  price {}  stock {}  size {}  {}",
                product.id,
                product.name,
                product.price,
                product.stock,
                format_size(product.size.as_ref()),
                thumbnail
            );
        }
        out
    }
}
