use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::setting;

pub struct SettingRepository {
    db: DatabaseConnection,
}

impl SettingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, setting: setting::ActiveModel) -> RepoResult<setting::Model> {
        Ok(setting.insert(&self.db).await?)
    }

    pub async fn list(&self) -> RepoResult<Vec<setting::Model>> {
        Ok(setting::Entity::find()
            .order_by_asc(setting::Column::Key)
            .all(&self.db)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = setting::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Setting"));
        }
        Ok(())
    }
}
