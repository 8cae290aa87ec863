//! HTTP client for the catalog API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::CatalogApi;
use crate::models::{DeleteReport, ErrorBody, NewProduct, Product, ProductPatch};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// HTTP client for communicating with the catalog API
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // --- Internal helpers ---

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_json_response(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to PUT {}", path))?;

        handle_json_response(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", path))?;

        handle_json_response(response).await
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.get_json("/products").await
    }

    async fn get_product(&self, id: &str) -> Result<Product> {
        self.get_json(&product_path(id)?).await
    }

    async fn add_product(&self, product: &NewProduct) -> Result<Product> {
        let mut form = Form::new();
        for (key, value) in product.text_fields() {
            form = form.text(key, value);
        }
        for image in &product.images {
            let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            form = form.part("images", part);
        }

        tracing::debug!(images = product.images.len(), "Submitting new product");
        let response = self
            .client
            .post(self.url("/products"))
            .multipart(form)
            .send()
            .await
            .context("Failed to POST /products")?;

        handle_json_response(response).await
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product> {
        self.put_json(&product_path(id)?, patch).await
    }

    async fn delete_product(&self, id: &str) -> Result<DeleteReport> {
        self.delete_json(&product_path(id)?).await
    }

    fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Path of one product, with the id encoded as a single segment
fn product_path(id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() || id == "." || id == ".." {
        anyhow::bail!("Invalid product id: {:?}", id);
    }
    Ok(format!("/products/{}", urlencoding::encode(id)))
}

async fn handle_json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("{}", error_message(status, &body));
    }

    serde_json::from_str(&body).context("Failed to parse response body")
}

/// Human-readable message for a non-2xx response
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message,
            error: Some(detail),
        }) => format!("{} ({}): {}", message, status, detail),
        Ok(ErrorBody { message, .. }) => format!("{} ({})", message, status),
        Err(_) if body.trim().is_empty() => format!("API error ({})", status),
        Err(_) => format!("API error ({}): {}", status, body.trim()),
    }
}
