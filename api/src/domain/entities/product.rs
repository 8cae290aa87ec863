//! Product domain entity
//!
//! Represents one catalog item with its images and stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Size class of a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Small,
    Medium,
    Large,
    #[default]
    Nil,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Small => write!(f, "small"),
            Category::Medium => write!(f, "medium"),
            Category::Large => write!(f, "large"),
            Category::Nil => write!(f, "nil"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Category::Small),
            "medium" => Ok(Category::Medium),
            "large" => Ok(Category::Large),
            "nil" => Ok(Category::Nil),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Physical dimensions of a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
}

impl Dimensions {
    /// Every side must be a finite, non-negative number
    pub fn validate(&self) -> Result<(), DomainError> {
        for (side, value) in [
            ("length", self.length),
            ("breadth", self.breadth),
            ("height", self.height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::Validation(format!(
                    "{} must be a non-negative number",
                    side
                )));
            }
        }
        Ok(())
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub images: Vec<String>,
    pub size: Option<Dimensions>,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a new product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub images: Vec<String>,
    pub size: Option<Dimensions>,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
}

impl NewProduct {
    /// Check the creation invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name must not be empty".to_string()));
        }
        if self.images.is_empty() {
            return Err(DomainError::Validation(
                "at least one image is required".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::Validation(
                "price must be a non-negative number".to_string(),
            ));
        }
        if let Some(size) = &self.size {
            size.validate()?;
        }
        Ok(())
    }
}

/// Fields to merge into an existing product
///
/// `None` leaves a field untouched. For `size`, `Some(None)` clears the
/// dimensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    pub size: Option<Option<Dimensions>>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.images.is_none()
            && self.size.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }

    /// Merge the supplied fields into `product` and bump `updated_at`
    pub fn apply_to(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(images) = &self.images {
            product.images = images.clone();
        }
        if let Some(size) = self.size {
            product.size = size;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        product.updated_at = now;
    }
}
