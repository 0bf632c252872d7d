use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{optional_text, require_text, validate_display_order, validate_year_range};
use crate::entity::education_achievement;
use crate::repository::education::EducationWithAchievements;
use crate::services::ServiceError;

/// Full education submission, used for both create and replace-update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct EducationPayload {
    #[schema(example = "Tsinghua University")]
    pub school: String,
    #[serde(default)]
    pub major: String,
    pub degree: Option<String>,
    pub description: Option<String>,
    #[schema(example = 2018)]
    pub start_year: i32,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub achievements: Vec<AchievementPayload>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AchievementPayload {
    pub achievement: String,
    #[serde(default)]
    pub display_order: i32,
}

impl EducationPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.school, "school", 256)?;
        optional_text(Some(&self.major), "major", 256)?;
        optional_text(self.degree.as_deref(), "degree", 256)?;
        optional_text(self.description.as_deref(), "description", 10_000)?;
        validate_year_range(self.start_year, self.end_year)?;
        validate_display_order(self.display_order)?;
        for a in &self.achievements {
            require_text(&a.achievement, "achievement", 2000)?;
            validate_display_order(a.display_order)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AchievementResponse {
    pub id: Uuid,
    pub achievement: String,
    pub display_order: i32,
}

impl From<education_achievement::Model> for AchievementResponse {
    fn from(m: education_achievement::Model) -> Self {
        Self {
            id: m.id,
            achievement: m.achievement,
            display_order: m.display_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationResponse {
    pub id: Uuid,
    pub school: String,
    pub major: String,
    pub degree: Option<String>,
    pub description: Option<String>,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub display_order: i32,
    pub achievements: Vec<AchievementResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EducationWithAchievements> for EducationResponse {
    fn from(a: EducationWithAchievements) -> Self {
        let e = a.education;
        Self {
            id: e.id,
            school: e.school,
            major: e.major,
            degree: e.degree,
            description: e.description,
            start_year: e.start_year,
            end_year: e.end_year,
            display_order: e.display_order,
            achievements: a.achievements.into_iter().map(Into::into).collect(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
