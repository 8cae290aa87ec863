//! Product handlers
//!
//! Endpoints for the product catalog.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::app::ProductDraft;
use crate::domain::entities::{Category, Dimensions, Product, ProductId, ProductUpdate};
use crate::domain::ports::ImageUpload;
use crate::error::AppError;
use crate::AppState;

/// Request body for a partial product update
///
/// Every field is optional. `size: null` clears the dimensions while an
/// absent `size` leaves them alone. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub size: Option<Option<Dimensions>>,
    #[serde(alias = "type")]
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            images: request.images,
            size: request.size,
            category: request.category,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Distinguish `"size": null` from a missing `size` key
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response for a deleted product
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductResponse {
    pub message: String,
    pub removed_images: Vec<String>,
    pub missing_images: Vec<String>,
    pub failed_images: Vec<String>,
}

/// Unparseable IDs cannot name a stored product
fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Product not found".to_string()))
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::rejected(rejection.status(), rejection.body_text())
}

fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::rejected(rejection.status(), rejection.body_text())
}

/// Map a multipart read failure, keeping 413 for bodies over the limit
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    AppError::rejected(e.status(), format!("{}: {}", context, e.body_text()))
}

/// POST /products
///
/// Create a product from a multipart form with one or more image files.
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let mut multipart = multipart.map_err(multipart_rejection)?;
    let mut draft = ProductDraft::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "image" | "images" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read upload", e))?;
                draft.images.push(ImageUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "name" | "length" | "breadth" | "height" | "price" | "stock" | "category"
            | "type" => {
                let value = field.text().await.map_err(|e| {
                    multipart_error(&format!("Failed to read field {}", field_name), e)
                })?;
                let slot = match field_name.as_str() {
                    "name" => &mut draft.name,
                    "length" => &mut draft.length,
                    "breadth" => &mut draft.breadth,
                    "height" => &mut draft.height,
                    "price" => &mut draft.price,
                    "stock" => &mut draft.stock,
                    _ => &mut draft.category,
                };
                *slot = Some(value);
            }
            other => {
                tracing::debug!("Ignoring unexpected form field: {}", other);
            }
        }
    }

    let product = state.product_service.create_product(draft).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
///
/// List every product.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    let product = state.product_service.get_product(&id).await?;
    Ok(Json(product))
}

/// PUT /products/:id
///
/// Merge the supplied fields into the product and return the result.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    let Json(request) = request.map_err(json_rejection)?;
    let update = ProductUpdate::from(request);
    let product = state.product_service.update_product(&id, &update).await?;
    Ok(Json(product))
}

/// DELETE /products/:id
///
/// Delete the product and its image files.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProductResponse>, AppError> {
    let id = parse_id(&id)?;
    let cleanup = state.product_service.delete_product(&id).await?;

    Ok(Json(DeleteProductResponse {
        message: "Product and associated images deleted successfully!".to_string(),
        removed_images: cleanup.removed,
        missing_images: cleanup.missing,
        failed_images: cleanup.failed,
    }))
}
