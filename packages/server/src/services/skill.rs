use std::sync::Arc;

use chrono::Utc;
use common::storage::StorageBackend;
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use super::ServiceResult;
use super::upload::{self, FileUpload, SKILL_ICON};
use crate::entity::skill;
use crate::models::skill::{DEFAULT_SKILL_CATEGORY, NewSkill, SkillChanges};
use crate::repository::skill::SkillRepository;

pub struct SkillService {
    repo: SkillRepository,
    storage: Arc<dyn StorageBackend>,
}

impl SkillService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            repo: SkillRepository::new(db),
            storage,
        }
    }

    #[instrument(skip_all, fields(name = %input.name))]
    pub async fn create_with_upload(
        &self,
        input: NewSkill,
        icon: Option<FileUpload>,
    ) -> ServiceResult<skill::Model> {
        input.validate()?;
        let stored = upload::store(&*self.storage, &SKILL_ICON, icon.as_ref()).await?;
        let icon_url = stored.map(|s| s.url);

        let now = Utc::now();
        let active = skill::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.trim().to_string()),
            value: Set(input.value),
            icon_url: Set(icon_url.clone()),
            category: Set(input
                .category
                .unwrap_or_else(|| DEFAULT_SKILL_CATEGORY.to_string())),
            display_order: Set(input.display_order),
            is_featured: Set(input.is_featured),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match self.repo.create(active).await {
            Ok(created) => {
                info!(skill_id = %created.id, "Skill created");
                Ok(created)
            }
            Err(e) => {
                if let Some(url) = &icon_url {
                    upload::discard(&*self.storage, url, "skill create failed").await;
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, changes, icon))]
    pub async fn update_with_upload(
        &self,
        id: Uuid,
        changes: SkillChanges,
        icon: Option<FileUpload>,
    ) -> ServiceResult<skill::Model> {
        changes.validate()?;
        upload::check(&*self.storage, &SKILL_ICON, icon.as_ref())?;

        let existing = self.repo.get_by_id(id).await?;
        let mut active = changes_to_active(&changes);

        let stored = upload::store(&*self.storage, &SKILL_ICON, icon.as_ref()).await?;
        if let Some(new) = &stored {
            if let Some(old) = &existing.icon_url {
                upload::discard(&*self.storage, old, "skill icon replaced").await;
            }
            active.icon_url = Set(Some(new.url.clone()));
        }

        match self.repo.update(id, active).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                if let Some(new) = &stored {
                    upload::discard(&*self.storage, &new.url, "skill update failed").await;
                }
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let existing = self.repo.get_by_id(id).await?;
        self.repo.delete(id).await?;
        if let Some(url) = &existing.icon_url {
            upload::discard(&*self.storage, url, "skill deleted").await;
        }
        info!(skill_id = %id, "Skill deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<skill::Model> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn list(&self) -> ServiceResult<Vec<skill::Model>> {
        Ok(self.repo.list().await?)
    }

    pub async fn featured(&self) -> ServiceResult<Vec<skill::Model>> {
        Ok(self.repo.list_featured().await?)
    }

    pub async fn by_category(&self, category: &str) -> ServiceResult<Vec<skill::Model>> {
        Ok(self.repo.list_by_category(category.trim()).await?)
    }
}

fn changes_to_active(changes: &SkillChanges) -> skill::ActiveModel {
    let mut active = skill::ActiveModel {
        is_featured: Set(changes.is_featured),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    if let Some(name) = &changes.name {
        active.name = Set(name.clone());
    }
    if let Some(value) = changes.value {
        active.value = Set(value);
    }
    if let Some(category) = &changes.category {
        active.category = Set(category.clone());
    }
    if let Some(order) = changes.display_order {
        active.display_order = Set(order);
    }
    active
}
