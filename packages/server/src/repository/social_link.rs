use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::social_link;

pub struct SocialLinkRepository {
    db: DatabaseConnection,
}

impl SocialLinkRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        link: social_link::ActiveModel,
    ) -> RepoResult<social_link::Model> {
        Ok(link.insert(&self.db).await?)
    }

    pub async fn list(&self) -> RepoResult<Vec<social_link::Model>> {
        Ok(social_link::Entity::find()
            .order_by_asc(social_link::Column::DisplayOrder)
            .order_by_asc(social_link::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = social_link::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Social link"));
        }
        Ok(())
    }
}
