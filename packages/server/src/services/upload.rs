use common::storage::{StorageBackend, StoredFile, UploadPolicy};
use tracing::{debug, warn};

use super::ServiceResult;

/// A file received from a client, fully buffered.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub const PROJECT_IMAGE: UploadPolicy = UploadPolicy {
    folder: "projects",
    max_size_mb: 10,
    allowed_extensions: &["jpg", "jpeg", "png", "webp"],
    required: false,
};

pub const SKILL_ICON: UploadPolicy = UploadPolicy {
    folder: "skills",
    max_size_mb: 5,
    allowed_extensions: &["jpg", "jpeg", "png", "webp", "svg", "ico"],
    required: false,
};

pub const CERTIFICATE_IMAGE: UploadPolicy = UploadPolicy {
    folder: "certificates",
    max_size_mb: 10,
    allowed_extensions: &["jpg", "jpeg", "png", "webp", "pdf"],
    required: true,
};

/// Check a file against its policy without touching storage.
pub(crate) fn check(
    storage: &dyn StorageBackend,
    policy: &UploadPolicy,
    file: Option<&FileUpload>,
) -> ServiceResult<()> {
    if policy.check_presence(file.is_some())?
        && let Some(file) = file
    {
        policy.validate(storage, &file.file_name, file.bytes.len() as u64)?;
    }
    Ok(())
}

/// Validate then store the file, if there is one.
pub(crate) async fn store(
    storage: &dyn StorageBackend,
    policy: &UploadPolicy,
    file: Option<&FileUpload>,
) -> ServiceResult<Option<StoredFile>> {
    check(storage, policy, file)?;
    let Some(file) = file else {
        return Ok(None);
    };
    let stored = storage
        .upload(&file.bytes, &file.file_name, policy.folder)
        .await?;
    Ok(Some(stored))
}

/// Best-effort removal of a stored file. Failures are logged, never returned.
pub(crate) async fn discard(storage: &dyn StorageBackend, url: &str, reason: &'static str) {
    match storage.delete(url).await {
        Ok(()) => debug!(url, reason, "Discarded stored file"),
        Err(e) => warn!(url, reason, error = %e, "Cleanup of stored file failed"),
    }
}
