//! In-memory `CatalogApi` for view tests

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::api::CatalogApi;
use crate::models::{Category, DeleteReport, Dimensions, NewProduct, Product, ProductPatch};

#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<Vec<Product>>,
    patches: Mutex<Vec<(String, ProductPatch)>>,
    submissions: Mutex<Vec<NewProduct>>,
    list_calls: AtomicU32,
    fail: AtomicBool,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, product: Product) -> Self {
        self.products.lock().unwrap().push(product);
        self
    }

    /// Make every call fail until reset
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn patches(&self) -> Vec<(String, ProductPatch)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<NewProduct> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("Database error (500 Internal Server Error): simulated");
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn get_product(&self, id: &str) -> Result<Product> {
        self.check()?;
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Product not found (404 Not Found)"))
    }

    async fn add_product(&self, new_product: &NewProduct) -> Result<Product> {
        self.submissions.lock().unwrap().push(new_product.clone());
        self.check()?;

        let mut products = self.products.lock().unwrap();
        let mut product = test_product(&format!("p{}", products.len() + 1), &new_product.name);
        product.images = new_product
            .images
            .iter()
            .map(|i| format!("/uploads/{}", i.file_name))
            .collect();
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product> {
        self.patches
            .lock()
            .unwrap()
            .push((id.to_string(), patch.clone()));
        self.check()?;

        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("Product not found (404 Not Found)"))?;

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(size) = patch.size {
            product.size = size;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<DeleteReport> {
        self.check()?;

        let mut products = self.products.lock().unwrap();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("Product not found (404 Not Found)"))?;
        let removed = products.remove(index);

        Ok(DeleteReport {
            message: "Product and associated images deleted successfully!".to_string(),
            removed_images: removed.images,
            ..Default::default()
        })
    }

    fn image_url(&self, path: &str) -> String {
        format!("http://catalog.test{}", path)
    }
}

pub fn test_product(id: &str, name: &str) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        name: name.to_string(),
        images: vec![format!("/uploads/{}.png", id)],
        size: Some(Dimensions {
            length: 10.0,
            breadth: 5.0,
            height: 5.0,
        }),
        category: Category::Nil,
        price: 20.0,
        stock: 3,
        created_at: now,
        updated_at: now,
    }
}
