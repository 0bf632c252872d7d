use async_trait::async_trait;
use serde::Serialize;

use super::error::StorageError;

/// A file that has been written to a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Generated object name (`<uuid>.<ext>`).
    pub name: String,
    /// Normalized logical folder, empty for the root.
    pub folder: String,
    /// Retrievable URL. The only reference persisted by callers.
    pub url: String,
}

/// Upload storage addressed by generated names and resolved back by URL.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store bytes under a freshly generated name inside `folder`.
    async fn upload(
        &self,
        content: &[u8],
        original_name: &str,
        folder: &str,
    ) -> Result<StoredFile, StorageError>;

    /// Delete the object a previously returned URL points to.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;

    /// Pre-upload check of size and extension. Identical for every backend.
    fn validate(
        &self,
        size_bytes: u64,
        extension: &str,
        max_size_mb: u64,
        allowed_extensions: &[&str],
    ) -> Result<(), StorageError> {
        validate_file(size_bytes, extension, max_size_mb, allowed_extensions)
    }
}

/// Size is capped at `max_size_mb` MiB; the extension is compared
/// case-insensitively and may be given with or without its dot.
pub fn validate_file(
    size_bytes: u64,
    extension: &str,
    max_size_mb: u64,
    allowed_extensions: &[&str],
) -> Result<(), StorageError> {
    let limit = max_size_mb * 1024 * 1024;
    if size_bytes > limit {
        return Err(StorageError::FileTooLarge {
            actual: size_bytes,
            limit,
        });
    }

    let ext = extension.trim_start_matches('.');
    let allowed = allowed_extensions
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext));
    if ext.is_empty() || !allowed {
        return Err(StorageError::UnsupportedFileType(if ext.is_empty() {
            "(none)".into()
        } else {
            ext.to_ascii_lowercase()
        }));
    }
    Ok(())
}
