//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::app::{ProductDraft, ProductService};
use crate::config::Config;
use crate::domain::entities::{Category, Dimensions, Product, ProductId};
use crate::domain::ports::{ImageStore, ImageUpload, ProductRepository};
use crate::AppState;

/// Create a test product with default values
pub fn test_product() -> Product {
    test_product_named("Box")
}

/// Create a test product with a specific name
pub fn test_product_named(name: &str) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(),
        name: name.to_string(),
        images: vec![format!("/uploads/{}.png", name.to_lowercase())],
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

/// A small fake PNG upload
pub fn png_upload(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: Some(file_name.to_string()),
        bytes: PNG_BYTES.to_vec(),
    }
}

/// Bytes used for fake image uploads
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// The add-product submission for `{name: "Box", 10x5x5, price 20, stock 3}`
pub fn draft_box() -> ProductDraft {
    ProductDraft {
        name: Some("Box".to_string()),
        length: Some("10".to_string()),
        breadth: Some("5".to_string()),
        height: Some("5".to_string()),
        price: Some("20".to_string()),
        stock: Some("3".to_string()),
        category: None,
        images: vec![png_upload("box.png")],
    }
}

/// Configuration pointing uploads at `upload_dir`
pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Application state wired to the given adapters
pub fn test_state(
    products: Arc<dyn ProductRepository>,
    images: Arc<dyn ImageStore>,
    upload_dir: &Path,
) -> AppState {
    AppState {
        product_service: Arc::new(ProductService::new(products, images)),
        config: test_config(upload_dir),
    }
}
