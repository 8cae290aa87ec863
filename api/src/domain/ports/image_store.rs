//! Image store port
//!
//! Abstracts where uploaded product images live. Stored images are addressed
//! by their public path (`/uploads/<filename>`), which is what product
//! records keep in their `images` list.

use async_trait::async_trait;

use crate::error::DomainError;

/// URL prefix under which stored images are served
pub const PUBLIC_PREFIX: &str = "/uploads";

/// An uploaded file as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name supplied by the client, used for its extension
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of removing an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The file was already gone
    Missing,
}

/// Storage for product image files
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an upload under a freshly generated unique name and return its
    /// public path
    async fn save(&self, upload: &ImageUpload) -> Result<String, DomainError>;

    /// Remove the file behind a public path. Removing an absent file is not
    /// an error.
    async fn remove(&self, public_path: &str) -> Result<RemoveOutcome, DomainError>;
}

/// Public path for a stored file name
pub fn public_path(file_name: &str) -> String {
    format!("{}/{}", PUBLIC_PREFIX, file_name)
}

/// File name behind a public path.
///
/// Accepts `/uploads/<name>`, `uploads/<name>` and a bare `<name>`. Anything
/// that would escape the store (nested or relative segments) is rejected.
pub fn stored_file_name(public_path: &str) -> Option<&str> {
    let trimmed = public_path.trim();
    let name = trimmed
        .strip_prefix(PUBLIC_PREFIX)
        .or_else(|| trimmed.strip_prefix(&PUBLIC_PREFIX[1..]))
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(trimmed);

    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return None;
    }
    Some(name)
}
