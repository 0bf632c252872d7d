use std::sync::Arc;

use chrono::Utc;
use common::storage::StorageBackend;
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use super::ServiceResult;
use super::upload::{self, CERTIFICATE_IMAGE, FileUpload};
use crate::entity::certificate;
use crate::models::certificate::{CertificateChanges, DEFAULT_ISSUER, NewCertificate};
use crate::repository::certificate::CertificateRepository;

pub struct CertificateService {
    repo: CertificateRepository,
    storage: Arc<dyn StorageBackend>,
}

impl CertificateService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            repo: CertificateRepository::new(db),
            storage,
        }
    }

    /// A certificate cannot be created without its image.
    #[instrument(skip_all, fields(name = %input.name))]
    pub async fn create_with_upload(
        &self,
        input: NewCertificate,
        image: Option<FileUpload>,
    ) -> ServiceResult<certificate::Model> {
        input.validate()?;
        let stored = upload::store(&*self.storage, &CERTIFICATE_IMAGE, image.as_ref()).await?;
        let image_url = stored.map(|s| s.url);

        let now = Utc::now();
        let active = certificate::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.trim().to_string()),
            image_url: Set(image_url.clone()),
            issue_date: Set(input.issue_date),
            issuer: Set(input.issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string())),
            credential_url: Set(input.credential_url),
            display_order: Set(input.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match self.repo.create(active).await {
            Ok(created) => {
                info!(certificate_id = %created.id, "Certificate created");
                Ok(created)
            }
            Err(e) => {
                if let Some(url) = &image_url {
                    upload::discard(&*self.storage, url, "certificate create failed").await;
                }
                Err(e.into())
            }
        }
    }

    /// On update the image is optional; without one the stored image is kept.
    #[instrument(skip(self, changes, image))]
    pub async fn update_with_upload(
        &self,
        id: Uuid,
        changes: CertificateChanges,
        image: Option<FileUpload>,
    ) -> ServiceResult<certificate::Model> {
        let policy = CERTIFICATE_IMAGE.with_required(false);
        changes.validate()?;
        upload::check(&*self.storage, &policy, image.as_ref())?;

        let existing = self.repo.get_by_id(id).await?;
        let mut active = changes_to_active(&changes);

        let stored = upload::store(&*self.storage, &policy, image.as_ref()).await?;
        if let Some(new) = &stored {
            if let Some(old) = &existing.image_url {
                upload::discard(&*self.storage, old, "certificate image replaced").await;
            }
            active.image_url = Set(Some(new.url.clone()));
        }

        match self.repo.update(id, active).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                if let Some(new) = &stored {
                    upload::discard(&*self.storage, &new.url, "certificate update failed").await;
                }
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let existing = self.repo.get_by_id(id).await?;
        self.repo.delete(id).await?;
        if let Some(url) = &existing.image_url {
            upload::discard(&*self.storage, url, "certificate deleted").await;
        }
        info!(certificate_id = %id, "Certificate deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<certificate::Model> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<certificate::Model>> {
        Ok(self.repo.list().await?)
    }
}

fn changes_to_active(changes: &CertificateChanges) -> certificate::ActiveModel {
    let mut active = certificate::ActiveModel {
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    if let Some(name) = &changes.name {
        active.name = Set(name.clone());
    }
    if let Some(date) = changes.issue_date {
        active.issue_date = Set(Some(date));
    }
    if let Some(issuer) = &changes.issuer {
        active.issuer = Set(issuer.clone());
    }
    if let Some(url) = &changes.credential_url {
        active.credential_url = Set(Some(url.clone()));
    }
    if let Some(order) = changes.display_order {
        active.display_order = Set(order);
    }
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::mock;
    use crate::services::ServiceError;
    use crate::services::test_support::MemoryStorage;

    fn certificate_row(id: Uuid, image_url: &str) -> certificate::Model {
        let now = Utc::now();
        certificate::Model {
            id,
            name: "CKA".into(),
            image_url: Some(image_url.into()),
            issue_date: None,
            issuer: "-".into(),
            credential_url: None,
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_without_image_is_rejected_before_any_write() {
        let storage = Arc::new(MemoryStorage::default());
        let db = mock().into_connection();

        let input = NewCertificate {
            name: "CKA".into(),
            ..Default::default()
        };
        let err = CertificateService::new(db.clone(), storage.clone())
            .create_with_upload(input, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(storage.upload_count(), 0);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn update_without_image_is_allowed() {
        let id = Uuid::new_v4();
        let image = "mem://certificates/cka.pdf";
        let storage = Arc::new(MemoryStorage::holding(&[image]));
        let db = mock()
            .append_query_results([vec![certificate_row(id, image)]])
            .append_query_results([vec![certificate_row(id, image)]])
            .into_connection();

        let changes = CertificateChanges {
            issuer: Some("CNCF".into()),
            ..Default::default()
        };
        let updated = CertificateService::new(db, storage.clone())
            .update_with_upload(id, changes, None)
            .await
            .unwrap();

        assert_eq!(updated.image_url.as_deref(), Some(image));
        assert!(storage.deleted().is_empty());
    }
}
