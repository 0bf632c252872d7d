use std::sync::Arc;

use chrono::Utc;
use common::storage::StorageBackend;
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use super::upload::{self, FileUpload, PROJECT_IMAGE};
use super::ServiceResult;
use crate::entity::project;
use crate::models::project::{DEFAULT_PROJECT_STATUS, NewProject, ProjectChanges};
use crate::repository::project::{ProjectRepository, ProjectWithTags};

pub struct ProjectService {
    repo: ProjectRepository,
    storage: Arc<dyn StorageBackend>,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            repo: ProjectRepository::new(db),
            storage,
        }
    }

    /// Validate, store the optional image, then persist project and tags.
    /// The image is removed again if persisting fails.
    #[instrument(skip_all, fields(title = %input.title))]
    pub async fn create_with_upload(
        &self,
        input: NewProject,
        image: Option<FileUpload>,
    ) -> ServiceResult<ProjectWithTags> {
        input.validate()?;
        let stored = upload::store(&*self.storage, &PROJECT_IMAGE, image.as_ref()).await?;
        let image_url = stored.map(|s| s.url);

        let now = Utc::now();
        let active = project::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.trim().to_string()),
            image_url: Set(image_url.clone()),
            demo_url: Set(input.demo_url.clone()),
            code_url: Set(input.code_url.trim().to_string()),
            display_order: Set(input.display_order),
            is_featured: Set(input.is_featured),
            status: Set(input
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match self.repo.create_with_children(active, &input.tags).await {
            Ok(created) => {
                info!(project_id = %created.project.id, "Project created");
                Ok(created)
            }
            Err(e) => {
                if let Some(url) = &image_url {
                    upload::discard(&*self.storage, url, "project create failed").await;
                }
                Err(e.into())
            }
        }
    }

    /// Merge `changes` onto the stored project. A new image replaces the old
    /// one: the old file is removed once the new upload has succeeded, and the
    /// new file is removed if persisting then fails.
    #[instrument(skip(self, changes, image))]
    pub async fn update_with_upload(
        &self,
        id: Uuid,
        changes: ProjectChanges,
        image: Option<FileUpload>,
    ) -> ServiceResult<ProjectWithTags> {
        changes.validate()?;
        upload::check(&*self.storage, &PROJECT_IMAGE, image.as_ref())?;

        let existing = self.repo.get_by_id(id).await?;
        let mut active = changes_to_active(&changes);

        let stored = upload::store(&*self.storage, &PROJECT_IMAGE, image.as_ref()).await?;
        if let Some(new) = &stored {
            if let Some(old) = &existing.image_url {
                upload::discard(&*self.storage, old, "project image replaced").await;
            }
            active.image_url = Set(Some(new.url.clone()));
        }

        match self
            .repo
            .update_with_children(id, active, changes.tags.as_deref())
            .await
        {
            Ok(updated) => Ok(updated),
            Err(e) => {
                if let Some(new) = &stored {
                    upload::discard(&*self.storage, &new.url, "project update failed").await;
                }
                Err(e.into())
            }
        }
    }

    /// Delete the row first, then its image on a best-effort basis.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let removed = self.repo.delete_with_children(id).await?;
        if let Some(url) = &removed.image_url {
            upload::discard(&*self.storage, url, "project deleted").await;
        }
        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<ProjectWithTags> {
        Ok(self.repo.get_by_id_with_children(id).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<ProjectWithTags>> {
        Ok(self.repo.list_with_children().await?)
    }

    pub async fn tags(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.distinct_tags().await?)
    }
}

/// Only supplied fields are set; `image_url` is left to the caller.
fn changes_to_active(changes: &ProjectChanges) -> project::ActiveModel {
    let mut active = project::ActiveModel {
        is_featured: Set(changes.is_featured),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    if let Some(title) = &changes.title {
        active.title = Set(title.clone());
    }
    if let Some(description) = &changes.description {
        active.description = Set(description.clone());
    }
    if let Some(demo_url) = &changes.demo_url {
        active.demo_url = Set(Some(demo_url.clone()));
    }
    if let Some(code_url) = &changes.code_url {
        active.code_url = Set(code_url.clone());
    }
    if let Some(order) = changes.display_order {
        active.display_order = Set(order);
    }
    if let Some(status) = &changes.status {
        active.status = Set(status.clone());
    }
    active
}
