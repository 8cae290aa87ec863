//! Database adapters
//!
//! Implementations of repository traits using SeaORM. Production runs on
//! PostgreSQL; the adapter tests run on in-memory SQLite.

pub mod product_repo;
pub mod schema;


pub use product_repo::SeaOrmProductRepository;
pub use schema::ensure_schema;
