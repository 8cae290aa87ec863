//! Router assembly
//!
//! Canonical routes live under `/products`. The `/api/...` aliases keep the
//! paths the first deployment's frontend was built against working.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::ports::image_store::PUBLIC_PREFIX;
use crate::handlers;
use crate::AppState;

/// Build the full application router for `state`
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Health checks
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Products
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .merge(legacy_routes())
        // Stored images
        .nest_service(PUBLIC_PREFIX, uploads)
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn legacy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/add_products", post(handlers::create_product))
        .route("/api/disp/products", get(handlers::list_products))
        .route("/api/disp/products/:id", get(handlers::get_product))
        .route("/api/update_products/:id", put(handlers::update_product))
        .route("/api/products_delete/:id", delete(handlers::delete_product))
}
