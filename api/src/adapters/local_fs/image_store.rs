//! Local filesystem adapter for ImageStore
//!
//! Files are written into a single directory, named by upload time in
//! milliseconds plus the original extension (`1700000000000.png`). A name
//! that is already taken gets a `-N` suffix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::ports::image_store::{public_path, stored_file_name};
use crate::domain::ports::{ImageStore, ImageUpload, RemoveOutcome};
use crate::error::DomainError;

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Image store backed by a directory on disk
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if needed
    pub async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            DomainError::Storage(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Absolute location of a public path inside the store
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        stored_file_name(public_path).map(|name| self.root.join(name))
    }
}

/// Generated file name for an upload
pub fn generated_file_name(timestamp_millis: i64, original: Option<&str>, attempt: u32) -> String {
    let extension = original.and_then(file_extension);
    let stem = if attempt == 0 {
        timestamp_millis.to_string()
    } else {
        format!("{}-{}", timestamp_millis, attempt)
    };

    match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

/// Extension of the client's file name, if it is plain alphanumeric
fn file_extension(original: &str) -> Option<&str> {
    Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let timestamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = generated_file_name(timestamp, upload.file_name.as_deref(), attempt);
            let path = self.root.join(&name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(DomainError::Storage(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            let written = async {
                file.write_all(&upload.bytes).await?;
                file.flush().await
            }
            .await;

            if let Err(e) = written {
                // Leave nothing half-written behind
                let _ = fs::remove_file(&path).await;
                return Err(DomainError::Storage(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                )));
            }

            tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "Stored image");
            return Ok(public_path(&name));
        }

        Err(DomainError::Storage(format!(
            "No free file name for upload at {}",
            timestamp
        )))
    }

    async fn remove(&self, public_path: &str) -> Result<RemoveOutcome, DomainError> {
        let path = self.resolve(public_path).ok_or_else(|| {
            DomainError::Validation(format!("Not a stored image path: {}", public_path))
        })?;

        tracing::info!("Attempting to delete file at: {}", path.display());

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Successfully deleted image: {}", path.display());
                Ok(RemoveOutcome::Removed)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Image not found: {}", path.display());
                Ok(RemoveOutcome::Missing)
            }
            Err(e) => Err(DomainError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
