//! Catalog client
//!
//! Views over the catalog REST API: a gallery of all products, a detail view
//! with inline editing, and an add-product form. The views only talk to the
//! backend through [`CatalogApi`], implemented over HTTP by [`CatalogClient`].

pub mod api;
pub mod client;
pub mod models;
pub mod views;

#[cfg(test)]
mod test_utils;

pub use api::CatalogApi;
pub use client::{CatalogClient, DEFAULT_API_URL};
