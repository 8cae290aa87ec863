//! Catalog API Server
//!
//! REST backend for a product catalog: products with images, stock and size.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod routes;

#[cfg(test)]
mod test_utils;


use adapters::{ensure_schema, LocalImageStore, SeaOrmProductRepository};
use app::ProductService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<ProductService>,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalog API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to the database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&db).await?;
    tracing::info!("Database connected");

    // Create adapters
    let product_repo = Arc::new(SeaOrmProductRepository::new(db));
    let image_store = Arc::new(LocalImageStore::new(config.upload_dir.clone()));
    image_store.ensure_dir().await?;
    tracing::info!("Storing uploads in {}", image_store.root().display());

    // Create application services
    let product_service = Arc::new(ProductService::new(product_repo, image_store));

    let state = AppState {
        product_service,
        config: config.clone(),
    };

    let app = routes::build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
