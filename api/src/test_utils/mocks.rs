//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{NewProduct, Product, ProductId, ProductUpdate};
use crate::domain::ports::image_store::{public_path, stored_file_name};
use crate::domain::ports::{ImageStore, ImageUpload, ProductRepository, RemoveOutcome};
use crate::error::DomainError;

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    /// Insertion order doubles as creation order
    products: Arc<RwLock<Vec<Product>>>,
    fail_writes: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products.write().unwrap().push(product);
        self
    }

    /// Make every write fail with a database error
    pub fn failing(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn count(&self) -> usize {
        self.products.read().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(DomainError::Database("simulated write failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.read().unwrap().clone())
    }

    async fn create(&self, new_product: &NewProduct) -> Result<Product, DomainError> {
        self.check_writable()?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: new_product.name.clone(),
            images: new_product.images.clone(),
            size: new_product.size,
            category: new_product.category,
            price: new_product.price,
            stock: new_product.stock,
            created_at: now,
            updated_at: now,
        };

        self.products.write().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        self.check_writable()?;

        let mut products = self.products.write().unwrap();
        Ok(products.iter_mut().find(|p| p.id == *id).map(|product| {
            update.apply_to(product, Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        self.check_writable()?;

        let mut products = self.products.write().unwrap();
        let before = products.len();
        products.retain(|p| p.id != *id);
        Ok(products.len() < before)
    }
}

// ============================================================================
// In-Memory Image Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryImageStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    next_name: AtomicU64,
    failing_removals: AtomicU32,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` removals fail with a storage error
    pub fn fail_next_removals(&self, n: u32) {
        self.failing_removals.store(n, Ordering::SeqCst);
    }

    pub fn contains(&self, public_path: &str) -> bool {
        stored_file_name(public_path)
            .map(|name| self.files.read().unwrap().contains_key(name))
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.files.read().unwrap().len()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let n = self.next_name.fetch_add(1, Ordering::SeqCst);
        let name = match upload
            .file_name
            .as_deref()
            .and_then(|f| f.rsplit_once('.'))
        {
            Some((_, ext)) => format!("{}.{}", n, ext),
            None => n.to_string(),
        };

        self.files
            .write()
            .unwrap()
            .insert(name.clone(), upload.bytes.clone());
        Ok(public_path(&name))
    }

    async fn remove(&self, public_path: &str) -> Result<RemoveOutcome, DomainError> {
        let remaining_failures = self.failing_removals.load(Ordering::SeqCst);
        if remaining_failures > 0 {
            self.failing_removals
                .store(remaining_failures - 1, Ordering::SeqCst);
            return Err(DomainError::Storage("simulated removal failure".to_string()));
        }

        let name = stored_file_name(public_path).ok_or_else(|| {
            DomainError::Validation(format!("Not a stored image path: {}", public_path))
        })?;

        match self.files.write().unwrap().remove(name) {
            Some(_) => Ok(RemoveOutcome::Removed),
            None => Ok(RemoveOutcome::Missing),
        }
    }
}
