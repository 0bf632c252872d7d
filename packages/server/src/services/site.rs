//! Sections, social links and settings: flat site configuration records.

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use super::{ServiceResult, conflict_on_duplicate};
use crate::entity::{section, setting, social_link};
use crate::models::site::{
    DEFAULT_SETTING_DATA_TYPE, SectionPayload, SettingPayload, SocialLinkPayload,
};
use crate::repository::section::SectionRepository;
use crate::repository::setting::SettingRepository;
use crate::repository::social_link::SocialLinkRepository;

pub struct SiteService {
    sections: SectionRepository,
    social_links: SocialLinkRepository,
    settings: SettingRepository,
}

impl SiteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sections: SectionRepository::new(db.clone()),
            social_links: SocialLinkRepository::new(db.clone()),
            settings: SettingRepository::new(db),
        }
    }

    pub async fn create_section(&self, payload: SectionPayload) -> ServiceResult<section::Model> {
        payload.validate()?;
        let now = Utc::now();
        let created = self
            .sections
            .create(section::ActiveModel {
                id: Set(Uuid::now_v7()),
                section_key: Set(payload.section_key.trim().to_string()),
                label: Set(payload.label.trim().to_string()),
                display_order: Set(payload.display_order),
                is_active: Set(payload.is_active),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .map_err(|e| conflict_on_duplicate(e, "A section with this key already exists"))?;
        info!(section_key = %created.section_key, "Section created");
        Ok(created)
    }

    pub async fn list_sections(&self) -> ServiceResult<Vec<section::Model>> {
        Ok(self.sections.list().await?)
    }

    pub async fn delete_section(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.sections.delete(id).await?)
    }

    pub async fn create_social_link(
        &self,
        payload: SocialLinkPayload,
    ) -> ServiceResult<social_link::Model> {
        payload.validate()?;
        let now = Utc::now();
        Ok(self
            .social_links
            .create(social_link::ActiveModel {
                id: Set(Uuid::now_v7()),
                platform: Set(payload.platform.trim().to_string()),
                url: Set(payload.url.trim().to_string()),
                icon_name: Set(payload.icon_name),
                display_order: Set(payload.display_order),
                is_active: Set(payload.is_active),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await?)
    }

    pub async fn list_social_links(&self) -> ServiceResult<Vec<social_link::Model>> {
        Ok(self.social_links.list().await?)
    }

    pub async fn delete_social_link(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.social_links.delete(id).await?)
    }

    pub async fn create_setting(&self, payload: SettingPayload) -> ServiceResult<setting::Model> {
        payload.validate()?;
        let now = Utc::now();
        let created = self
            .settings
            .create(setting::ActiveModel {
                id: Set(Uuid::now_v7()),
                key: Set(payload.key.trim().to_string()),
                value: Set(payload.value),
                data_type: Set(payload
                    .data_type
                    .unwrap_or_else(|| DEFAULT_SETTING_DATA_TYPE.to_string())),
                description: Set(payload.description),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .map_err(|e| conflict_on_duplicate(e, "A setting with this key already exists"))?;
        info!(key = %created.key, "Setting created");
        Ok(created)
    }

    pub async fn list_settings(&self) -> ServiceResult<Vec<setting::Model>> {
        Ok(self.settings.list().await?)
    }

    pub async fn delete_setting(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.settings.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{affected, mock};
    use crate::services::ServiceError;

    #[tokio::test]
    async fn deleting_missing_setting_is_not_found() {
        let db = mock().append_exec_results([affected(0)]).into_connection();
        let err = SiteService::new(db)
            .delete_setting(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_section_label_never_reaches_the_database() {
        let db = mock().into_connection();
        let payload = SectionPayload {
            section_key: "about".into(),
            label: "  ".into(),
            display_order: 0,
            is_active: true,
        };
        let err = SiteService::new(db.clone())
            .create_section(payload)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(db.into_transaction_log().is_empty());
    }
}
