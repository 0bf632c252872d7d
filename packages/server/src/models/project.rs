use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{
    non_blank, optional_text, require_text, validate_display_order, validate_status,
};
use crate::entity::project_tag;
use crate::error::AppError;
use crate::repository::project::ProjectWithTags;
use crate::services::ServiceError;
use crate::utils::multipart::MultipartForm;

pub const PROJECT_STATUSES: &[&str] = &["draft", "published", "archived"];
pub const DEFAULT_PROJECT_STATUS: &str = "published";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct TagPayload {
    #[schema(example = "rust")]
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

/// Parse the `tags` form field: a JSON array of tag objects or names, or a
/// comma-separated list of names ordered by position.
pub fn parse_tags(raw: &str) -> Result<Vec<TagPayload>, AppError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagEntry {
        Full(TagPayload),
        Name(String),
    }

    let raw = raw.trim();
    if raw.starts_with('[') {
        let entries: Vec<TagEntry> = serde_json::from_str(raw)
            .map_err(|e| AppError::Validation(format!("Invalid tags: {e}")))?;
        return Ok(entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                TagEntry::Full(tag) => tag,
                TagEntry::Name(name) => TagPayload {
                    name,
                    color: None,
                    display_order: i as i32,
                },
            })
            .collect());
    }

    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, name)| TagPayload {
            name: name.to_string(),
            color: None,
            display_order: i as i32,
        })
        .collect())
}

fn validate_tags(tags: &[TagPayload]) -> Result<(), ServiceError> {
    for tag in tags {
        require_text(&tag.name, "tag name", 50)?;
        optional_text(tag.color.as_deref(), "tag color", 20)?;
        validate_display_order(tag.display_order)?;
    }
    Ok(())
}

/// Text fields of a project creation form.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub demo_url: Option<String>,
    pub code_url: String,
    pub display_order: i32,
    pub is_featured: bool,
    pub status: Option<String>,
    pub tags: Vec<TagPayload>,
}

impl NewProject {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            title: form.text_or_empty("title"),
            description: form.text_or_empty("description"),
            demo_url: form.text("demo_url").map(str::to_string),
            code_url: form.text_or_empty("code_url"),
            display_order: form.parse("display_order")?.unwrap_or(0),
            is_featured: form.flag("is_featured"),
            status: form.text("status").map(str::to_string),
            tags: form.text("tags").map(parse_tags).transpose()?.unwrap_or_default(),
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.title, "title", 256)?;
        require_text(&self.description, "description", 10_000)?;
        require_text(&self.code_url, "code_url", 2048)?;
        optional_text(self.demo_url.as_deref(), "demo_url", 2048)?;
        validate_display_order(self.display_order)?;
        if let Some(status) = &self.status {
            validate_status(status, PROJECT_STATUSES)?;
        }
        validate_tags(&self.tags)
    }
}

/// Partial project update. Blank text fields leave the stored value as is;
/// `is_featured` is always overwritten.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub demo_url: Option<String>,
    pub code_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_featured: bool,
    pub status: Option<String>,
    /// `Some` replaces the whole tag set.
    pub tags: Option<Vec<TagPayload>>,
}

impl ProjectChanges {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            title: non_blank(form.text("title")),
            description: non_blank(form.text("description")),
            demo_url: non_blank(form.text("demo_url")),
            code_url: non_blank(form.text("code_url")),
            display_order: form.parse("display_order")?,
            is_featured: form.flag("is_featured"),
            status: non_blank(form.text("status")),
            tags: form.text("tags").map(parse_tags).transpose()?,
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(title) = &self.title {
            require_text(title, "title", 256)?;
        }
        optional_text(self.description.as_deref(), "description", 10_000)?;
        optional_text(self.code_url.as_deref(), "code_url", 2048)?;
        optional_text(self.demo_url.as_deref(), "demo_url", 2048)?;
        if let Some(order) = self.display_order {
            validate_display_order(order)?;
        }
        if let Some(status) = &self.status {
            validate_status(status, PROJECT_STATUSES)?;
        }
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectTagResponse {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub display_order: i32,
}

impl From<project_tag::Model> for ProjectTagResponse {
    fn from(m: project_tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
            display_order: m.display_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// `null` when the project has no image.
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub code_url: String,
    pub display_order: i32,
    pub is_featured: bool,
    #[schema(example = "published")]
    pub status: String,
    pub tags: Vec<ProjectTagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectWithTags> for ProjectResponse {
    fn from(a: ProjectWithTags) -> Self {
        let p = a.project;
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            image_url: p.image_url,
            demo_url: p.demo_url,
            code_url: p.code_url,
            display_order: p.display_order,
            is_featured: p.is_featured,
            status: p.status,
            tags: a.tags.into_iter().map(Into::into).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
