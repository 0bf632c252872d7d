use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::skill;

pub struct SkillRepository {
    db: DatabaseConnection,
}

impl SkillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, skill: skill::ActiveModel) -> RepoResult<skill::Model> {
        Ok(skill.insert(&self.db).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<skill::Model> {
        skill::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Skill"))
    }

    pub async fn update(&self, id: Uuid, mut skill: skill::ActiveModel) -> RepoResult<skill::Model> {
        skill.id = Set(id);
        match skill.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound("Skill")),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = skill::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Skill"));
        }
        Ok(())
    }

    pub async fn list(&self) -> RepoResult<Vec<skill::Model>> {
        Ok(skill::Entity::find()
            .order_by_asc(skill::Column::DisplayOrder)
            .order_by_asc(skill::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn list_featured(&self) -> RepoResult<Vec<skill::Model>> {
        Ok(skill::Entity::find()
            .filter(skill::Column::IsFeatured.eq(true))
            .order_by_asc(skill::Column::DisplayOrder)
            .order_by_asc(skill::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_category(&self, category: &str) -> RepoResult<Vec<skill::Model>> {
        Ok(skill::Entity::find()
            .filter(skill::Column::Category.eq(category))
            .order_by_asc(skill::Column::DisplayOrder)
            .order_by_asc(skill::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
