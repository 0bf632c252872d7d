use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::error::StorageError;
use super::path::{check_relative, normalize_folder, object_key, object_name};
use super::traits::{StorageBackend, StoredFile};
use crate::config::normalize_mount;

const TEMP_DIR: &str = ".tmp";

/// Filesystem-backed upload storage.
///
/// Objects live at `{base_dir}/{folder}/{name}` and are addressed by
/// path-style URLs `{mount}/{folder}/{name}`, which the HTTP layer serves
/// straight from `base_dir`.
#[derive(Debug)]
pub struct LocalStorage {
    base_dir: PathBuf,
    /// URL prefix without a trailing slash; empty when mounted at `/`.
    mount: String,
}

impl LocalStorage {
    /// Create the store, making sure the base and temp directories exist.
    pub async fn new(base_dir: PathBuf, mount: &str) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_dir).await?;
        fs::create_dir_all(base_dir.join(TEMP_DIR)).await?;

        Ok(Self {
            base_dir,
            mount: normalize_mount(mount),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_dir
            .join(TEMP_DIR)
            .join(uuid::Uuid::new_v4().to_string())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.mount, key)
    }

    /// Map a URL produced by [`LocalStorage::upload`] back to its file.
    fn resolve_url(&self, url: &str) -> Result<PathBuf, StorageError> {
        let prefix = format!("{}/", self.mount);
        let key = url
            .strip_prefix(&prefix)
            .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;

        if check_relative(key).is_err() || key.split('/').next() == Some(TEMP_DIR) {
            return Err(StorageError::InvalidUrl(url.to_string()));
        }
        Ok(self.base_dir.join(key))
    }

    async fn write_atomic(&self, target: &Path, content: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = target.parent()
            && let Err(e) = fs::create_dir_all(parent).await
        {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(
        &self,
        content: &[u8],
        original_name: &str,
        folder: &str,
    ) -> Result<StoredFile, StorageError> {
        let folder = normalize_folder(folder)?;
        let name = object_name(original_name);
        let key = object_key(&folder, &name);
        let target = self.base_dir.join(&key);

        self.write_atomic(&target, content).await?;

        let url = self.url_for(&key);
        info!(path = %target.display(), size = content.len(), url = %url, "Stored upload");

        Ok(StoredFile { name, folder, url })
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let path = self.resolve_url(url)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), url, "Deleted upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Upload already gone");
                Err(StorageError::NotFound(url.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
