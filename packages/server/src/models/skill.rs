use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::shared::{non_blank, require_text, validate_display_order};
use crate::entity::skill;
use crate::error::AppError;
use crate::services::ServiceError;
use crate::utils::multipart::MultipartForm;

pub const DEFAULT_SKILL_CATEGORY: &str = "programming";

fn validate_value(value: i32) -> Result<(), ServiceError> {
    if !(0..=100).contains(&value) {
        return Err(ServiceError::Validation("value must be between 0 and 100".into()));
    }
    Ok(())
}

/// Text fields of a skill creation form.
#[derive(Debug, Clone, Default)]
pub struct NewSkill {
    pub name: String,
    pub value: i32,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_featured: bool,
}

impl NewSkill {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            name: form.text_or_empty("name"),
            value: form.parse("value")?.unwrap_or(0),
            category: form.text("category").map(str::to_string),
            display_order: form.parse("display_order")?.unwrap_or(0),
            is_featured: form.flag("is_featured"),
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.name, "name", 100)?;
        validate_value(self.value)?;
        if let Some(category) = &self.category {
            require_text(category, "category", 50)?;
        }
        validate_display_order(self.display_order)
    }
}

/// Partial skill update; `is_featured` is always overwritten.
#[derive(Debug, Clone, Default)]
pub struct SkillChanges {
    pub name: Option<String>,
    pub value: Option<i32>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_featured: bool,
}

impl SkillChanges {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            name: non_blank(form.text("name")),
            value: form.parse("value")?,
            category: non_blank(form.text("category")),
            display_order: form.parse("display_order")?,
            is_featured: form.flag("is_featured"),
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            require_text(name, "name", 100)?;
        }
        if let Some(value) = self.value {
            validate_value(value)?;
        }
        if let Some(category) = &self.category {
            require_text(category, "category", 50)?;
        }
        if let Some(order) = self.display_order {
            validate_display_order(order)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(example = 85)]
    pub value: i32,
    pub icon_url: Option<String>,
    #[schema(example = "programming")]
    pub category: String,
    pub display_order: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<skill::Model> for SkillResponse {
    fn from(m: skill::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            value: m.value,
            icon_url: m.icon_url,
            category: m.category,
            display_order: m.display_order,
            is_featured: m.is_featured,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_a_percentage() {
        let form = MultipartForm::with_fields(&[("name", "Rust"), ("value", "101")]);
        let skill = NewSkill::from_form(&form).unwrap();
        assert!(skill.validate().is_err());

        let form = MultipartForm::with_fields(&[("name", "Rust"), ("value", "100")]);
        assert!(NewSkill::from_form(&form).unwrap().validate().is_ok());
    }

    #[test]
    fn non_numeric_value_is_rejected_while_parsing() {
        let form = MultipartForm::with_fields(&[("name", "Rust"), ("value", "high")]);
        assert!(matches!(
            NewSkill::from_form(&form),
            Err(AppError::Validation(_))
        ));
    }
}
