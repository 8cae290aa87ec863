//! SeaORM entities
//!
//! Table definitions used by the database adapters.

pub mod products;
