//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Each test builds its own `AppState` from these pieces, so tests never share
//! a repository or an upload directory.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
