//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod product;

pub use product::{Category, Dimensions, NewProduct, Product, ProductId, ProductUpdate};
