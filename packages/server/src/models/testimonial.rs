use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{optional_text, require_text, validate_display_order, validate_status};
use crate::entity::testimonial;
use crate::services::ServiceError;

pub const TESTIMONIAL_STATUSES: &[&str] = &["pending", "approved", "rejected"];
pub const DEFAULT_TESTIMONIAL_STATUS: &str = "approved";

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TestimonialPayload {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    pub title: Option<String>,
    pub message: String,
    pub avatar_url: Option<String>,
    #[serde(default = "default_rating")]
    #[schema(example = 5)]
    pub rating: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
    pub status: Option<String>,
}

fn default_rating() -> i32 {
    5
}

impl TestimonialPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.name, "name", 256)?;
        optional_text(self.title.as_deref(), "title", 256)?;
        require_text(&self.message, "message", 5000)?;
        optional_text(self.avatar_url.as_deref(), "avatar_url", 2048)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ServiceError::Validation("rating must be between 1 and 5".into()));
        }
        validate_display_order(self.display_order)?;
        if let Some(status) = &self.status {
            validate_status(status, TESTIMONIAL_STATUSES)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub message: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    pub is_featured: bool,
    pub display_order: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<testimonial::Model> for TestimonialResponse {
    fn from(m: testimonial::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            title: m.title,
            message: m.message,
            avatar_url: m.avatar_url,
            rating: m.rating,
            is_featured: m.is_featured,
            display_order: m.display_order,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
