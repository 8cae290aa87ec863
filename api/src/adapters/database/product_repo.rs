//! SeaORM adapter for ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use crate::domain::entities::{Category, Dimensions, NewProduct, Product, ProductId, ProductUpdate};
use crate::domain::ports::ProductRepository;
use crate::entity::products;
use crate::error::DomainError;

/// SeaORM implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(Product::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        results.into_iter().map(Product::try_from).collect()
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();
        let (length, breadth, height) = split_size(product.size);

        let model = products::ActiveModel {
            id: Set(ProductId::new().0),
            name: Set(product.name.clone()),
            images: Set(images_to_json(&product.images)),
            length: Set(length),
            breadth: Set(breadth),
            height: Set(height),
            category: Set(product.category.to_string()),
            price: Set(product.price),
            stock: Set(i64::from(product.stock)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(db_err)?;

        Product::try_from(result)
    }

    async fn update(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        let Some(existing) = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        if let Some(name) = &update.name {
            active_model.name = Set(name.clone());
        }
        if let Some(images) = &update.images {
            active_model.images = Set(images_to_json(images));
        }
        if let Some(size) = update.size {
            let (length, breadth, height) = split_size(size);
            active_model.length = Set(length);
            active_model.breadth = Set(breadth);
            active_model.height = Set(height);
        }
        if let Some(category) = update.category {
            active_model.category = Set(category.to_string());
        }
        if let Some(price) = update.price {
            active_model.price = Set(price);
        }
        if let Some(stock) = update.stock {
            active_model.stock = Set(i64::from(stock));
        }
        active_model.updated_at = Set(Utc::now().fixed_offset());

        let updated = active_model.update(&self.db).await.map_err(db_err)?;

        Product::try_from(updated).map(Some)
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

fn split_size(size: Option<Dimensions>) -> (Option<f64>, Option<f64>, Option<f64>) {
    match size {
        Some(d) => (Some(d.length), Some(d.breadth), Some(d.height)),
        None => (None, None, None),
    }
}

fn images_to_json(images: &[String]) -> serde_json::Value {
    serde_json::Value::from(images.to_vec())
}

/// Convert SeaORM model to domain entity
impl TryFrom<products::Model> for Product {
    type Error = DomainError;

    fn try_from(model: products::Model) -> Result<Self, Self::Error> {
        let images: Vec<String> = serde_json::from_value(model.images).map_err(|e| {
            DomainError::Database(format!("Invalid images for product {}: {}", model.id, e))
        })?;

        let size = match (model.length, model.breadth, model.height) {
            (Some(length), Some(breadth), Some(height)) => Some(Dimensions {
                length,
                breadth,
                height,
            }),
            _ => None,
        };

        Ok(Product {
            id: ProductId(model.id),
            name: model.name,
            images,
            size,
            category: model.category.parse().unwrap_or(Category::Nil),
            price: model.price,
            stock: u32::try_from(model.stock).unwrap_or(0),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}
