use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use super::ServiceResult;
use crate::entity::education;
use crate::models::education::EducationPayload;
use crate::repository::education::{EducationRepository, EducationWithAchievements};

pub struct EducationService {
    repo: EducationRepository,
}

impl EducationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: EducationRepository::new(db),
        }
    }

    pub async fn create(&self, payload: EducationPayload) -> ServiceResult<EducationWithAchievements> {
        payload.validate()?;
        let now = Utc::now();
        let mut active = to_active(&payload);
        active.id = Set(Uuid::now_v7());
        active.created_at = Set(now);
        active.updated_at = Set(now);

        let created = self
            .repo
            .create_with_children(active, &payload.achievements)
            .await?;
        info!(education_id = %created.education.id, "Education created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<EducationWithAchievements> {
        Ok(self.repo.get_by_id_with_children(id).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: EducationPayload,
    ) -> ServiceResult<EducationWithAchievements> {
        payload.validate()?;
        let mut active = to_active(&payload);
        active.updated_at = Set(Utc::now());

        Ok(self
            .repo
            .update_with_children(id, active, &payload.achievements)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo.delete_with_children(id).await?;
        info!(education_id = %id, "Education deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<EducationWithAchievements>> {
        Ok(self.repo.list_with_children().await?)
    }
}

fn to_active(p: &EducationPayload) -> education::ActiveModel {
    education::ActiveModel {
        school: Set(p.school.trim().to_string()),
        major: Set(p.major.trim().to_string()),
        degree: Set(p.degree.clone()),
        description: Set(p.description.clone()),
        start_year: Set(p.start_year),
        end_year: Set(p.end_year),
        display_order: Set(p.display_order),
        ..Default::default()
    }
}
