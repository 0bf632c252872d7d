use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::testimonial;

pub struct TestimonialRepository {
    db: DatabaseConnection,
}

impl TestimonialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        testimonial: testimonial::ActiveModel,
    ) -> RepoResult<testimonial::Model> {
        Ok(testimonial.insert(&self.db).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<testimonial::Model> {
        testimonial::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Testimonial"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut testimonial: testimonial::ActiveModel,
    ) -> RepoResult<testimonial::Model> {
        testimonial.id = Set(id);
        match testimonial.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound("Testimonial")),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = testimonial::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Testimonial"));
        }
        Ok(())
    }

    pub async fn list(&self) -> RepoResult<Vec<testimonial::Model>> {
        Ok(ordered(testimonial::Entity::find()).all(&self.db).await?)
    }

    /// Featured testimonials that are also approved.
    pub async fn list_featured(&self) -> RepoResult<Vec<testimonial::Model>> {
        Ok(ordered(testimonial::Entity::find())
            .filter(testimonial::Column::IsFeatured.eq(true))
            .filter(testimonial::Column::Status.eq("approved"))
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_status(&self, status: &str) -> RepoResult<Vec<testimonial::Model>> {
        Ok(ordered(testimonial::Entity::find())
            .filter(testimonial::Column::Status.eq(status))
            .all(&self.db)
            .await?)
    }
}

fn ordered(query: Select<testimonial::Entity>) -> Select<testimonial::Entity> {
    query
        .order_by_asc(testimonial::Column::DisplayOrder)
        .order_by_desc(testimonial::Column::CreatedAt)
}
