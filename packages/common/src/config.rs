use std::path::PathBuf;

use serde::Deserialize;

/// Which storage backend uploads go to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Local,
    Remote,
}

/// Upload storage configuration. Selected once at startup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Default: "local".
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default)]
    pub local: LocalStorageConfig,
    #[serde(default)]
    pub remote: RemoteStorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocalStorageConfig {
    /// Directory files are written under. Default: "./uploads".
    #[serde(default = "default_local_base_dir")]
    pub base_dir: PathBuf,
    /// URL prefix the directory is served at. Default: "/uploads".
    #[serde(default = "default_local_mount")]
    pub mount: String,
}

fn default_local_base_dir() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_local_mount() -> String {
    "/uploads".into()
}

impl LocalStorageConfig {
    /// The mount as a URL prefix: `/name` without a trailing slash, or empty
    /// when files are served from the root.
    pub fn mount_prefix(&self) -> String {
        normalize_mount(&self.mount)
    }
}

/// Normalize a configured mount: `uploads`, `/uploads/` and `/uploads` all
/// become `/uploads`; `/` and `` become empty.
pub fn normalize_mount(mount: &str) -> String {
    match mount.trim().trim_matches('/') {
        "" => String::new(),
        m => format!("/{m}"),
    }
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_local_base_dir(),
            mount: default_local_mount(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct RemoteStorageConfig {
    /// Base URL of the object storage service, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// Default: "portfolio".
    #[serde(default = "default_remote_bucket")]
    pub bucket: String,
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout. Default: 30.
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_remote_bucket() -> String {
    "portfolio".into()
}
fn default_remote_timeout_secs() -> u64 {
    30
}

impl Default for RemoteStorageConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            bucket: default_remote_bucket(),
            api_key: String::new(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for RemoteStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStorageConfig")
            .field("url", &self.url)
            .field("bucket", &self.bucket)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounts_normalize_to_one_prefix_form() {
        assert_eq!(normalize_mount("uploads"), "/uploads");
        assert_eq!(normalize_mount("/uploads/"), "/uploads");
        assert_eq!(normalize_mount("/media/files"), "/media/files");
        assert_eq!(normalize_mount("/"), "");
        assert_eq!(normalize_mount(""), "");
    }
}
