use std::fmt;

/// Errors that can occur during upload storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The upload exceeds the size limit of its endpoint.
    FileTooLarge { actual: u64, limit: u64 },
    /// The file extension is not in the endpoint's allow-list.
    UnsupportedFileType(String),
    /// The endpoint requires a file and none was supplied.
    MissingFile,
    /// A folder or object path was malformed or tried to escape its root.
    InvalidPath(String),
    /// A stored-file URL could not be mapped back to a storage location.
    InvalidUrl(String),
    /// The referenced object does not exist.
    NotFound(String),
    /// The backend could not be constructed from configuration.
    Config(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The request to the remote storage service failed in transit.
    #[cfg(feature = "remote-storage")]
    Http(reqwest::Error),
    /// The remote storage service answered with a non-success status.
    Remote { status: u16, body: String },
}

impl StorageError {
    /// Whether the error stems from the uploaded file itself rather than the backend.
    pub fn is_rejected_file(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge { .. } | Self::UnsupportedFileType(_) | Self::MissingFile
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooLarge { actual, limit } => {
                write!(f, "file exceeds size limit ({actual} > {limit} bytes)")
            }
            Self::UnsupportedFileType(ext) => write!(f, "unsupported file type: {ext}"),
            Self::MissingFile => write!(f, "a file is required"),
            Self::InvalidPath(msg) => write!(f, "invalid storage path: {msg}"),
            Self::InvalidUrl(url) => write!(f, "unrecognized storage url: {url}"),
            Self::NotFound(path) => write!(f, "stored file not found: {path}"),
            Self::Config(msg) => write!(f, "storage misconfigured: {msg}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            #[cfg(feature = "remote-storage")]
            Self::Http(err) => write!(f, "storage request failed: {err}"),
            Self::Remote { status, body } => {
                write!(f, "storage service returned {status}: {body}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "remote-storage")]
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "remote-storage")]
impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
