use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use super::ServiceResult;
use crate::entity::experience;
use crate::models::experience::ExperiencePayload;
use crate::repository::experience::{ExperienceRepository, ExperienceWithChildren};

pub struct ExperienceService {
    repo: ExperienceRepository,
}

impl ExperienceService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: ExperienceRepository::new(db),
        }
    }

    pub async fn create(&self, payload: ExperiencePayload) -> ServiceResult<ExperienceWithChildren> {
        payload.validate()?;
        let now = Utc::now();
        let mut active = to_active(&payload);
        active.id = Set(Uuid::now_v7());
        active.created_at = Set(now);
        active.updated_at = Set(now);

        let created = self
            .repo
            .create_with_children(active, &payload.responsibilities, &payload.skills)
            .await?;
        info!(experience_id = %created.experience.id, "Experience created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<ExperienceWithChildren> {
        Ok(self.repo.get_by_id_with_children(id).await?)
    }

    /// Replace the experience and all of its children with `payload`.
    pub async fn update(
        &self,
        id: Uuid,
        payload: ExperiencePayload,
    ) -> ServiceResult<ExperienceWithChildren> {
        payload.validate()?;
        let mut active = to_active(&payload);
        active.updated_at = Set(Utc::now());

        Ok(self
            .repo
            .update_with_children(id, active, &payload.responsibilities, &payload.skills)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo.delete_with_children(id).await?;
        info!(experience_id = %id, "Experience deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<ExperienceWithChildren>> {
        Ok(self.repo.list_with_children().await?)
    }
}

fn to_active(p: &ExperiencePayload) -> experience::ActiveModel {
    experience::ActiveModel {
        title: Set(p.title.trim().to_string()),
        company: Set(p.company.trim().to_string()),
        location: Set(p.location.trim().to_string()),
        start_year: Set(p.start_year),
        end_year: Set(p.end_year),
        current_job: Set(p.current_job),
        display_order: Set(p.display_order),
        ..Default::default()
    }
}
