//! Product service
//!
//! Use cases for the catalog: validated creation with image storage, listing,
//! lookup, partial updates and deletion with image cleanup.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Category, Dimensions, NewProduct, Product, ProductId, ProductUpdate};
use crate::domain::ports::{ImageStore, ImageUpload, ProductRepository, RemoveOutcome};
use crate::error::{AppError, DomainError};

/// Attempts per image before a removal failure is given up on
const REMOVE_ATTEMPTS: u32 = 3;

/// Pause between removal attempts, multiplied by the attempt number
const REMOVE_BACKOFF: Duration = Duration::from_millis(50);

const MISSING_FIELDS: &str = "All fields are required";

/// Raw add-product submission as received from a multipart form
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub length: Option<String>,
    pub breadth: Option<String>,
    pub height: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub images: Vec<ImageUpload>,
}

/// What happened to each image of a deleted product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCleanup {
    pub removed: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<String>,
}

/// Service for managing catalog products
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    images: Arc<dyn ImageStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { products, images }
    }

    /// Create a product from a submitted draft
    ///
    /// The draft is fully validated before any file is written, so a
    /// rejected submission leaves neither a record nor a file behind. If the
    /// record cannot be persisted, the files stored for it are removed again.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, AppError> {
        let ProductDraft {
            name,
            length,
            breadth,
            height,
            price,
            stock,
            category,
            images,
        } = draft;

        let name = present(name);
        let price = present(price);
        let stock = present(stock);
        let images: Vec<ImageUpload> = images.into_iter().filter(|i| !i.bytes.is_empty()).collect();

        let (Some(name), Some(price), Some(stock)) = (name, price, stock) else {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()).into());
        };
        if images.is_empty() {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()).into());
        }

        let size = parse_dimensions(present(length), present(breadth), present(height))?;
        let category = match present(category) {
            Some(raw) => raw
                .parse::<Category>()
                .map_err(DomainError::Validation)?,
            None => Category::default(),
        };

        let mut new_product = NewProduct {
            name: name.trim().to_string(),
            images: Vec::new(),
            size,
            category,
            price: parse_non_negative("price", &price)?,
            stock: parse_stock(&stock)?,
        };

        let mut stored = Vec::with_capacity(images.len());
        for upload in &images {
            match self.images.save(upload).await {
                Ok(path) => stored.push(path),
                Err(e) => {
                    self.discard_images(&stored).await;
                    return Err(e.into());
                }
            }
        }
        new_product.images = stored;

        let created = match new_product.validate() {
            Ok(()) => self.products.create(&new_product).await,
            Err(e) => Err(e),
        };

        match created {
            Ok(product) => {
                tracing::info!(id = %product.id, name = %product.name, "Product added");
                Ok(product)
            }
            Err(e) => {
                self.discard_images(&new_product.images).await;
                Err(e.into())
            }
        }
    }

    /// All products
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.find_all().await?)
    }

    /// One product by ID
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Merge the supplied fields into an existing product
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, AppError> {
        if update.is_empty() {
            return self.get_product(id).await;
        }

        let updated = self
            .products
            .update(id, update)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id = %updated.id, "Product updated");
        Ok(updated)
    }

    /// Delete a product and the image files it references
    ///
    /// Images are removed first. An image that is already gone counts as
    /// removed; one that keeps failing is logged and skipped. The record is
    /// deleted either way.
    pub async fn delete_product(&self, id: &ProductId) -> Result<ImageCleanup, AppError> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut cleanup = ImageCleanup::default();
        for image in &product.images {
            match self.remove_image(image).await {
                Ok(RemoveOutcome::Removed) => cleanup.removed.push(image.clone()),
                Ok(RemoveOutcome::Missing) => cleanup.missing.push(image.clone()),
                Err(e) => {
                    tracing::error!("Error deleting image {}: {}", image, e);
                    cleanup.failed.push(image.clone());
                }
            }
        }

        if !self.products.delete(id).await? {
            // Deleted concurrently between the lookup and now
            return Err(not_found(id));
        }

        tracing::info!(
            id = %id,
            removed = cleanup.removed.len(),
            missing = cleanup.missing.len(),
            failed = cleanup.failed.len(),
            "Product deleted"
        );
        Ok(cleanup)
    }

    /// Remove one image, retrying storage failures a bounded number of times
    async fn remove_image(&self, public_path: &str) -> Result<RemoveOutcome, DomainError> {
        let mut attempt = 1;
        loop {
            match self.images.remove(public_path).await {
                Ok(outcome) => return Ok(outcome),
                Err(DomainError::Storage(msg)) if attempt < REMOVE_ATTEMPTS => {
                    tracing::warn!(attempt, "Retrying removal of {}: {}", public_path, msg);
                    tokio::time::sleep(REMOVE_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Best-effort removal of files stored for a product that was never created
    async fn discard_images(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.images.remove(path).await {
                tracing::error!("Failed to discard orphaned image {}: {}", path, e);
            }
        }
    }
}

fn not_found(id: &ProductId) -> AppError {
    tracing::debug!(id = %id, "Product not found");
    AppError::NotFound("Product not found".to_string())
}

/// A submitted value, treating blank strings as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_non_negative(field: &str, raw: &str) -> Result<f64, DomainError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(DomainError::Validation(format!(
            "{} must be a non-negative number",
            field
        ))),
    }
}

fn parse_stock(raw: &str) -> Result<u32, DomainError> {
    raw.trim().parse::<u32>().map_err(|_| {
        DomainError::Validation("stock must be a non-negative integer".to_string())
    })
}

/// Dimensions are optional as a group: all three or none
fn parse_dimensions(
    length: Option<String>,
    breadth: Option<String>,
    height: Option<String>,
) -> Result<Option<Dimensions>, DomainError> {
    match (length, breadth, height) {
        (None, None, None) => Ok(None),
        (Some(length), Some(breadth), Some(height)) => {
            let size = Dimensions {
                length: parse_non_negative("length", &length)?,
                breadth: parse_non_negative("breadth", &breadth)?,
                height: parse_non_negative("height", &height)?,
            };
            Ok(Some(size))
        }
        _ => Err(DomainError::Validation(
            "length, breadth and height must be given together".to_string(),
        )),
    }
}
