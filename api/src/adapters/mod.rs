//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod database;
pub mod local_fs;

pub use database::{ensure_schema, SeaOrmProductRepository};
pub use local_fs::LocalImageStore;
