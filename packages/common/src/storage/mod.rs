mod error;
mod path;
mod policy;
mod traits;

pub mod local;
#[cfg(feature = "remote-storage")]
pub mod remote;

use std::sync::Arc;

pub use error::StorageError;
pub use path::{extension_of, normalize_folder};
pub use policy::UploadPolicy;
pub use traits::{StorageBackend, StoredFile, validate_file};

use crate::config::{StorageBackendKind, StorageConfig};

/// Build the configured backend. Called once at startup.
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn StorageBackend>, StorageError> {
    match config.backend {
        StorageBackendKind::Local => {
            let store =
                local::LocalStorage::new(config.local.base_dir.clone(), &config.local.mount)
                    .await?;
            tracing::info!(base_dir = %config.local.base_dir.display(), "Using local upload storage");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "remote-storage")]
        StorageBackendKind::Remote => {
            let remote = &config.remote;
            let store = remote::RemoteStorage::new(
                &remote.url,
                &remote.bucket,
                &remote.api_key,
                std::time::Duration::from_secs(remote.timeout_secs),
            )?;
            tracing::info!(url = %remote.url, bucket = %remote.bucket, "Using remote upload storage");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "remote-storage"))]
        StorageBackendKind::Remote => Err(StorageError::Config(
            "built without the remote-storage feature".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalStorageConfig;

    #[tokio::test]
    async fn builds_local_backend_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackendKind::Local,
            local: LocalStorageConfig {
                base_dir: dir.path().join("files"),
                mount: "/files".into(),
            },
            ..Default::default()
        };

        let backend = from_config(&config).await.unwrap();
        let stored = backend.upload(b"x", "a.png", "projects").await.unwrap();
        assert!(stored.url.starts_with("/files/projects/"));
    }

    #[cfg(feature = "remote-storage")]
    #[tokio::test]
    async fn remote_backend_requires_url() {
        let config = StorageConfig {
            backend: StorageBackendKind::Remote,
            ..Default::default()
        };
        assert!(matches!(
            from_config(&config).await,
            Err(StorageError::Config(_))
        ));
    }
}
