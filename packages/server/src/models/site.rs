use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{optional_text, require_text, validate_display_order, validate_status};
use crate::entity::{section, setting, social_link};
use crate::services::ServiceError;

pub const SETTING_DATA_TYPES: &[&str] = &["string", "number", "boolean", "json"];
pub const DEFAULT_SETTING_DATA_TYPE: &str = "string";

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SectionPayload {
    #[schema(example = "projects")]
    pub section_key: String,
    #[schema(example = "Projects")]
    pub label: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active")]
    pub is_active: bool,
}

impl SectionPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.section_key, "section_key", 100)?;
        require_text(&self.label, "label", 256)?;
        validate_display_order(self.display_order)
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SocialLinkPayload {
    #[schema(example = "github")]
    pub platform: String,
    pub url: String,
    pub icon_name: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active")]
    pub is_active: bool,
}

impl SocialLinkPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.platform, "platform", 50)?;
        require_text(&self.url, "url", 2048)?;
        optional_text(self.icon_name.as_deref(), "icon_name", 100)?;
        validate_display_order(self.display_order)
    }
}

fn active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SettingPayload {
    #[schema(example = "site_title")]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[schema(example = "string")]
    pub data_type: Option<String>,
    pub description: Option<String>,
}

impl SettingPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.key, "key", 100)?;
        optional_text(self.description.as_deref(), "description", 1000)?;
        if let Some(data_type) = &self.data_type {
            validate_status(data_type, SETTING_DATA_TYPES)
                .map_err(|_| ServiceError::Validation(format!(
                    "data_type must be one of: {}",
                    SETTING_DATA_TYPES.join(", ")
                )))?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SectionResponse {
    pub id: Uuid,
    pub section_key: String,
    pub label: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<section::Model> for SectionResponse {
    fn from(m: section::Model) -> Self {
        Self {
            id: m.id,
            section_key: m.section_key,
            label: m.label,
            display_order: m.display_order,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SocialLinkResponse {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon_name: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<social_link::Model> for SocialLinkResponse {
    fn from(m: social_link::Model) -> Self {
        Self {
            id: m.id,
            platform: m.platform,
            url: m.url,
            icon_name: m.icon_name,
            display_order: m.display_order,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SettingResponse {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub data_type: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<setting::Model> for SettingResponse {
    fn from(m: setting::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            value: m.value,
            data_type: m.data_type,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
