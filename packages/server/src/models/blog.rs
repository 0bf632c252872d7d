use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{optional_text, require_text, validate_display_order, validate_status};
use crate::entity::blog_tag;
use crate::repository::blog::BlogPostWithTags;
use crate::services::ServiceError;

pub const BLOG_STATUSES: &[&str] = &["draft", "published", "archived"];
pub const DEFAULT_BLOG_STATUS: &str = "draft";
pub const PUBLISHED_STATUS: &str = "published";

/// Full blog post submission, used for both create and replace-update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct BlogPostPayload {
    #[schema(example = "Shipping a portfolio in Rust")]
    pub title: String,
    /// Lowercase letters, digits and `-`.
    #[schema(example = "shipping-a-portfolio-in-rust")]
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// Stamped with the current time when a post is published without one.
    /// Omitting it on update keeps the stored date.
    pub publish_date: Option<DateTime<Utc>>,
    #[schema(example = "draft")]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<BlogTagPayload>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct BlogTagPayload {
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

impl BlogPostPayload {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.title, "title", 256)?;
        require_text(&self.slug, "slug", 256)?;
        validate_slug(self.slug.trim())?;
        require_text(&self.content, "content", 100_000)?;
        optional_text(self.excerpt.as_deref(), "excerpt", 1000)?;
        optional_text(self.featured_image.as_deref(), "featured_image", 2048)?;
        if let Some(status) = &self.status {
            validate_status(status, BLOG_STATUSES)?;
        }
        for tag in &self.tags {
            require_text(&tag.name, "tag name", 50)?;
            validate_display_order(tag.display_order)?;
        }
        Ok(())
    }

    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_BLOG_STATUS)
    }
}

fn validate_slug(slug: &str) -> Result<(), ServiceError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid || slug.starts_with('-') || slug.ends_with('-') {
        return Err(ServiceError::Validation(
            "slug may only contain lowercase letters, digits and inner hyphens".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogTagResponse {
    pub id: Uuid,
    pub name: String,
    pub display_order: i32,
}

impl From<blog_tag::Model> for BlogTagResponse {
    fn from(m: blog_tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            display_order: m.display_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub status: String,
    pub view_count: i32,
    pub tags: Vec<BlogTagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPostWithTags> for BlogPostResponse {
    fn from(a: BlogPostWithTags) -> Self {
        let p = a.post;
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            content: p.content,
            excerpt: p.excerpt,
            featured_image: p.featured_image,
            publish_date: p.publish_date,
            status: p.status,
            view_count: p.view_count,
            tags: a.tags.into_iter().map(Into::into).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
