//! Wire types for the catalog API

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product size class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Small,
    Medium,
    Large,
    #[default]
    Nil,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Small => "small",
            Category::Medium => "medium",
            Category::Large => "large",
            Category::Nil => "nil",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
}

/// A product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub images: Vec<String>,
    #[serde(default)]
    pub size: Option<Dimensions>,
    #[serde(default)]
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update body. Only the fields that are set are sent.
///
/// `size: Some(None)` is sent as `"size": null` and clears the dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Option<Dimensions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An image file to upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Read an image from disk, keeping its file name for the upload
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        Ok(Self { file_name, bytes })
    }
}

/// Add-product submission
///
/// Fields are kept as entered and sent as multipart text fields. Blank
/// fields are left out of the submission and validated by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub length: String,
    pub breadth: String,
    pub height: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub images: Vec<ImageFile>,
}

impl NewProduct {
    /// Non-blank text fields in submission order
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("length", &self.length),
            ("breadth", &self.breadth),
            ("height", &self.height),
            ("price", &self.price),
            ("stock", &self.stock),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key, value.trim().to_string()))
        .collect()
    }
}

/// Response to a delete
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub message: String,
    #[serde(default)]
    pub removed_images: Vec<String>,
    #[serde(default)]
    pub missing_images: Vec<String>,
    #[serde(default)]
    pub failed_images: Vec<String>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialization() {
        let json = r#"{
            "id": "6a0d3c52-4a41-4f59-8e37-2f0d0c0a5b11",
            "name": "Box",
            "images": ["/uploads/1700000000000.png"],
            "size": {"length": 10.0, "breadth": 5.0, "height": 5.0},
            "category": "small",
            "price": 20.0,
            "stock": 3,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Box");
        assert_eq!(product.category, Category::Small);
        assert_eq!(product.size.unwrap().breadth, 5.0);
    }

    #[test]
    fn test_product_without_size() {
        let json = r#"{
            "id": "a", "name": "Rug", "images": [], "size": null,
            "category": "nil", "price": 1.5, "stock": 0,
            "createdAt": "2024-05-01T10:00:00Z", "updatedAt": "2024-05-01T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.size.is_none());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ProductPatch {
            price: Some(50.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"price":50.0}"#);
    }

    #[test]
    fn test_patch_clearing_size_sends_null() {
        let patch = ProductPatch {
            size: Some(None),
            category: Some(Category::Large),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"size":null,"category":"large"}"#
        );
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn test_new_product_skips_blank_fields() {
        let new_product = NewProduct {
            name: " Box ".to_string(),
            price: "20".to_string(),
            stock: "3".to_string(),
            length: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            new_product.text_fields(),
            vec![
                ("name", "Box".to_string()),
                ("price", "20".to_string()),
                ("stock", "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_delete_report_defaults() {
        let report: DeleteReport =
            serde_json::from_str(r#"{"message": "Product and associated images deleted successfully!"}"#)
                .unwrap();
        assert!(report.removed_images.is_empty());
    }
}
