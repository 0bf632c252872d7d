use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use super::ServiceResult;
use crate::entity::testimonial;
use crate::models::shared::validate_status;
use crate::models::testimonial::{
    DEFAULT_TESTIMONIAL_STATUS, TESTIMONIAL_STATUSES, TestimonialPayload,
};
use crate::repository::testimonial::TestimonialRepository;

pub struct TestimonialService {
    repo: TestimonialRepository,
}

impl TestimonialService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: TestimonialRepository::new(db),
        }
    }

    pub async fn create(&self, payload: TestimonialPayload) -> ServiceResult<testimonial::Model> {
        payload.validate()?;
        let now = Utc::now();
        let mut active = to_active(&payload);
        active.id = Set(Uuid::now_v7());
        active.created_at = Set(now);
        active.updated_at = Set(now);

        let created = self.repo.create(active).await?;
        info!(testimonial_id = %created.id, "Testimonial created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<testimonial::Model> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: TestimonialPayload,
    ) -> ServiceResult<testimonial::Model> {
        payload.validate()?;
        let mut active = to_active(&payload);
        active.updated_at = Set(Utc::now());
        Ok(self.repo.update(id, active).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        info!(testimonial_id = %id, "Testimonial deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<testimonial::Model>> {
        Ok(self.repo.list().await?)
    }

    pub async fn featured(&self) -> ServiceResult<Vec<testimonial::Model>> {
        Ok(self.repo.list_featured().await?)
    }

    pub async fn by_status(&self, status: &str) -> ServiceResult<Vec<testimonial::Model>> {
        validate_status(status, TESTIMONIAL_STATUSES)?;
        Ok(self.repo.list_by_status(status).await?)
    }
}

fn to_active(p: &TestimonialPayload) -> testimonial::ActiveModel {
    testimonial::ActiveModel {
        name: Set(p.name.trim().to_string()),
        title: Set(p.title.clone()),
        message: Set(p.message.trim().to_string()),
        avatar_url: Set(p.avatar_url.clone()),
        rating: Set(p.rating),
        is_featured: Set(p.is_featured),
        display_order: Set(p.display_order),
        status: Set(p
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_TESTIMONIAL_STATUS.to_string())),
        ..Default::default()
    }
}
