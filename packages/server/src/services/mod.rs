//! Business rules between handlers and repositories: validation, defaults,
//! and the upload-then-persist write path with compensating deletes.

pub mod blog;
pub mod certificate;
pub mod education;
pub mod experience;
pub mod project;
pub mod site;
pub mod skill;
pub mod testimonial;
mod upload;

pub use upload::FileUpload;

use common::storage::StorageError;
use sea_orm::DbErr;

use crate::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected before any side effect.
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// The storage backend failed; nothing was persisted.
    #[error("upload failed: {0}")]
    Upload(#[source] StorageError),
    /// The database write failed and was rolled back.
    #[error("persistence failed: {0}")]
    Persistence(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what.into()),
            RepositoryError::Db(e) => Self::Persistence(e),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        if err.is_rejected_file() {
            Self::Validation(err.to_string())
        } else {
            Self::Upload(err)
        }
    }
}

/// Map a unique-key violation to `Conflict`, everything else as usual.
pub(crate) fn conflict_on_duplicate(err: RepositoryError, message: &str) -> ServiceError {
    if err.is_unique_violation() {
        ServiceError::Conflict(message.into())
    } else {
        err.into()
    }
}
