use super::error::StorageError;
use super::path::extension_of;
use super::traits::StorageBackend;

/// Per-endpoint upload rules: where files go, how large they may be,
/// which types are accepted, and whether a file must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub folder: &'static str,
    pub max_size_mb: u64,
    pub allowed_extensions: &'static [&'static str],
    pub required: bool,
}

impl UploadPolicy {
    /// Same rules with the file made mandatory or optional.
    pub const fn with_required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    /// Apply the absent-file rule. `Ok(false)` means there is nothing to upload.
    pub fn check_presence(&self, present: bool) -> Result<bool, StorageError> {
        match (present, self.required) {
            (true, _) => Ok(true),
            (false, true) => Err(StorageError::MissingFile),
            (false, false) => Ok(false),
        }
    }

    /// Validate a concrete file against this policy using the backend's rules.
    pub fn validate(
        &self,
        backend: &dyn StorageBackend,
        file_name: &str,
        size_bytes: u64,
    ) -> Result<(), StorageError> {
        backend.validate(
            size_bytes,
            &extension_of(file_name),
            self.max_size_mb,
            self.allowed_extensions,
        )
    }
}
