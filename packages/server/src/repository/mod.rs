//! Database access. Each repository owns a handle to the connection pool it
//! was constructed with; aggregate repositories wrap every mutation in a
//! single transaction.

pub mod blog;
pub mod certificate;
pub mod education;
pub mod experience;
pub mod project;
pub mod section;
pub mod setting;
pub mod skill;
pub mod social_link;
pub mod testimonial;

use std::collections::HashMap;

use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl RepositoryError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Db(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))))
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Bucket child rows by their parent id, preserving query order within each bucket.
pub(crate) fn group_by_parent<T>(
    rows: Vec<T>,
    parent_of: impl Fn(&T) -> Uuid,
) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(parent_of(&row)).or_default().push(row);
    }
    grouped
}

/// Number of rows actually written by an insert that ignores conflicts.
pub(crate) fn inserted_or_ignored(result: Result<u64, DbErr>) -> Result<u64, DbErr> {
    match result {
        Ok(n) => Ok(n),
        Err(DbErr::RecordNotInserted) => Ok(0),
        Err(e) => Err(e),
    }
}
