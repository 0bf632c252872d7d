use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::{RepoResult, RepositoryError};
use crate::entity::certificate;

pub struct CertificateRepository {
    db: DatabaseConnection,
}

impl CertificateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        certificate: certificate::ActiveModel,
    ) -> RepoResult<certificate::Model> {
        Ok(certificate.insert(&self.db).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<certificate::Model> {
        certificate::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Certificate"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut certificate: certificate::ActiveModel,
    ) -> RepoResult<certificate::Model> {
        certificate.id = Set(id);
        match certificate.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound("Certificate")),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let res = certificate::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Certificate"));
        }
        Ok(())
    }

    /// Ordered by display order, newest issue first within the same order.
    pub async fn list(&self) -> RepoResult<Vec<certificate::Model>> {
        Ok(certificate::Entity::find()
            .order_by_asc(certificate::Column::DisplayOrder)
            .order_by_desc(certificate::Column::IssueDate)
            .order_by_desc(certificate::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
