use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{require_text, validate_display_order, validate_year_range};
use crate::entity::{experience_responsibility, experience_skill};
use crate::repository::experience::ExperienceWithChildren;
use crate::services::ServiceError;

/// Full experience submission, used for both create and replace-update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ExperiencePayload {
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[schema(example = "Acme Corp")]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[schema(example = 2021)]
    pub start_year: i32,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub current_job: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub responsibilities: Vec<ResponsibilityPayload>,
    /// Repeated skill names are stored once.
    #[serde(default)]
    pub skills: Vec<ExperienceSkillPayload>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ResponsibilityPayload {
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ExperienceSkillPayload {
    pub skill_name: String,
    #[serde(default)]
    pub display_order: i32,
}

impl ExperiencePayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.title, "title", 256)?;
        require_text(&self.company, "company", 256)?;
        validate_year_range(self.start_year, self.end_year)?;
        if self.current_job && self.end_year.is_some() {
            return Err(ServiceError::Validation(
                "a current job cannot have an end_year".into(),
            ));
        }
        validate_display_order(self.display_order)?;
        for r in &self.responsibilities {
            require_text(&r.description, "responsibility", 2000)?;
            validate_display_order(r.display_order)?;
        }
        for s in &self.skills {
            require_text(&s.skill_name, "skill_name", 100)?;
            validate_display_order(s.display_order)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ResponsibilityResponse {
    pub id: Uuid,
    pub description: String,
    pub display_order: i32,
}

impl From<experience_responsibility::Model> for ResponsibilityResponse {
    fn from(m: experience_responsibility::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            display_order: m.display_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ExperienceSkillResponse {
    pub id: Uuid,
    pub skill_name: String,
    pub display_order: i32,
}

impl From<experience_skill::Model> for ExperienceSkillResponse {
    fn from(m: experience_skill::Model) -> Self {
        Self {
            id: m.id,
            skill_name: m.skill_name,
            display_order: m.display_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ExperienceResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub current_job: bool,
    pub display_order: i32,
    pub responsibilities: Vec<ResponsibilityResponse>,
    pub skills: Vec<ExperienceSkillResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExperienceWithChildren> for ExperienceResponse {
    fn from(a: ExperienceWithChildren) -> Self {
        let e = a.experience;
        Self {
            id: e.id,
            title: e.title,
            company: e.company,
            location: e.location,
            start_year: e.start_year,
            end_year: e.end_year,
            current_job: e.current_job,
            display_order: e.display_order,
            responsibilities: a.responsibilities.into_iter().map(Into::into).collect(),
            skills: a.skills.into_iter().map(Into::into).collect(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
