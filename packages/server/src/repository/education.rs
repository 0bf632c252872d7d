use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{RepoResult, RepositoryError, group_by_parent};
use crate::entity::{education, education_achievement};
use crate::models::education::AchievementPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct EducationWithAchievements {
    pub education: education::Model,
    pub achievements: Vec<education_achievement::Model>,
}

pub struct EducationRepository {
    db: DatabaseConnection,
}

impl EducationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_with_children(
        &self,
        education: education::ActiveModel,
        achievements: &[AchievementPayload],
    ) -> RepoResult<EducationWithAchievements> {
        let txn = self.db.begin().await?;

        let education = education.insert(&txn).await?;
        insert_achievements(&txn, education.id, achievements).await?;
        let achievements = load_achievements(&txn, education.id).await?;

        txn.commit().await?;
        Ok(EducationWithAchievements {
            education,
            achievements,
        })
    }

    pub async fn get_by_id_with_children(
        &self,
        id: Uuid,
    ) -> RepoResult<EducationWithAchievements> {
        let education = education::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Education"))?;
        let achievements = load_achievements(&self.db, id).await?;
        Ok(EducationWithAchievements {
            education,
            achievements,
        })
    }

    /// Overwrite the education row and replace its achievements wholesale.
    pub async fn update_with_children(
        &self,
        id: Uuid,
        mut education: education::ActiveModel,
        achievements: &[AchievementPayload],
    ) -> RepoResult<EducationWithAchievements> {
        education.id = Set(id);
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        let education = education.update(&txn).await?;

        education_achievement::Entity::delete_many()
            .filter(education_achievement::Column::EducationId.eq(id))
            .exec(&txn)
            .await?;
        insert_achievements(&txn, id, achievements).await?;
        let achievements = load_achievements(&txn, id).await?;

        txn.commit().await?;
        Ok(EducationWithAchievements {
            education,
            achievements,
        })
    }

    pub async fn delete_with_children(&self, id: Uuid) -> RepoResult<()> {
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        education_achievement::Entity::delete_many()
            .filter(education_achievement::Column::EducationId.eq(id))
            .exec(&txn)
            .await?;
        education::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn list_with_children(&self) -> RepoResult<Vec<EducationWithAchievements>> {
        let educations = education::Entity::find()
            .order_by_asc(education::Column::DisplayOrder)
            .order_by_desc(education::Column::StartYear)
            .all(&self.db)
            .await?;
        if educations.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = educations.iter().map(|e| e.id).collect();

        let achievements = education_achievement::Entity::find()
            .filter(education_achievement::Column::EducationId.is_in(ids))
            .order_by_asc(education_achievement::Column::DisplayOrder)
            .order_by_asc(education_achievement::Column::CreatedAt)
            .all(&self.db)
            .await?;
        let mut achievements = group_by_parent(achievements, |a| a.education_id);

        Ok(educations
            .into_iter()
            .map(|education| EducationWithAchievements {
                achievements: achievements.remove(&education.id).unwrap_or_default(),
                education,
            })
            .collect())
    }
}

async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> RepoResult<education::Model> {
    education::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(RepositoryError::NotFound("Education"))
}

async fn insert_achievements<C: ConnectionTrait>(
    conn: &C,
    education_id: Uuid,
    achievements: &[AchievementPayload],
) -> RepoResult<()> {
    if achievements.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = achievements
        .iter()
        .map(|a| education_achievement::ActiveModel {
            id: Set(Uuid::now_v7()),
            education_id: Set(education_id),
            achievement: Set(a.achievement.trim().to_string()),
            display_order: Set(a.display_order),
            created_at: Set(now),
        });
    education_achievement::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn load_achievements<C: ConnectionTrait>(
    conn: &C,
    education_id: Uuid,
) -> RepoResult<Vec<education_achievement::Model>> {
    Ok(education_achievement::Entity::find()
        .filter(education_achievement::Column::EducationId.eq(education_id))
        .order_by_asc(education_achievement::Column::DisplayOrder)
        .order_by_asc(education_achievement::Column::CreatedAt)
        .all(conn)
        .await?)
}
