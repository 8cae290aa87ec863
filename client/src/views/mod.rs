//! Catalog views
//!
//! Each view owns its state and talks to the backend only through
//! [`CatalogApi`](crate::api::CatalogApi). Rendering is plain text.

pub mod add_form;
pub mod detail;
pub mod gallery;

pub use add_form::AddForm;
pub use detail::{DetailView, EditForm};
pub use gallery::Gallery;

use std::fmt;

use crate::models::Dimensions;

/// Outcome message shown to the user once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Failure(msg) => msg,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "✅ {}", msg),
            Notice::Failure(msg) => write!(f, "❌ {}", msg),
        }
    }
}

/// `10 x 5 x 5 cm`, or `N/A` without dimensions
pub(crate) fn format_size(size: Option<&Dimensions>) -> String {
    match size {
        Some(d) => format!("{} x {} x {} cm", d.length, d.breadth, d.height),
        None => "N/A".to_string(),
    }
}
