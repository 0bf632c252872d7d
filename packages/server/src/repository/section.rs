use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::section;

pub struct SectionRepository {
    db: DatabaseConnection,
}

impl SectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, section: section::ActiveModel) -> RepoResult<section::Model> {
        Ok(section.insert(&self.db).await?)
    }

    pub async fn list(&self) -> RepoResult<Vec<section::Model>> {
        Ok(section::Entity::find()
            .order_by_asc(section::Column::DisplayOrder)
            .order_by_asc(section::Column::SectionKey)
            .all(&self.db)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = section::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Section"));
        }
        Ok(())
    }
}
