//! Domain layer
//!
//! Contains pure business logic with no framework dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for persistence and image storage

pub mod entities;
pub mod ports;
