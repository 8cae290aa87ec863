//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod product_service;

pub use product_service::{ImageCleanup, ProductDraft, ProductService};
