use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, warn};
use uuid::Uuid;

use super::{ServiceResult, conflict_on_duplicate};
use crate::entity::blog_post;
use crate::models::blog::{BlogPostPayload, PUBLISHED_STATUS};
use crate::repository::blog::{BlogPostWithTags, BlogRepository};

pub struct BlogService {
    repo: BlogRepository,
}

impl BlogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: BlogRepository::new(db),
        }
    }

    pub async fn create(&self, payload: BlogPostPayload) -> ServiceResult<BlogPostWithTags> {
        payload.validate()?;
        let now = Utc::now();
        let mut active = to_active(&payload);
        active.publish_date = Set(initial_publish_date(&payload));
        active.id = Set(Uuid::now_v7());
        active.view_count = Set(0);
        active.created_at = Set(now);
        active.updated_at = Set(now);

        let created = self
            .repo
            .create_with_children(active, &payload.tags)
            .await
            .map_err(|e| conflict_on_duplicate(e, "A post with this slug already exists"))?;
        info!(post_id = %created.post.id, slug = %created.post.slug, "Blog post created");
        Ok(created)
    }

    /// Fetch by id and count the view.
    pub async fn get(&self, id: Uuid) -> ServiceResult<BlogPostWithTags> {
        let post = self.repo.get_by_id_with_children(id).await?;
        Ok(self.count_view(post).await)
    }

    /// Fetch by slug and count the view.
    pub async fn get_by_slug(&self, slug: &str) -> ServiceResult<BlogPostWithTags> {
        let post = self.repo.get_by_slug_with_children(slug).await?;
        Ok(self.count_view(post).await)
    }

    /// A failed increment is logged, not returned.
    async fn count_view(&self, mut post: BlogPostWithTags) -> BlogPostWithTags {
        match self.repo.increment_view_count(post.post.id).await {
            Ok(true) => post.post.view_count += 1,
            Ok(false) => {}
            Err(e) => warn!(post_id = %post.post.id, error = %e, "Failed to count blog view"),
        }
        post
    }

    pub async fn update(&self, id: Uuid, payload: BlogPostPayload) -> ServiceResult<BlogPostWithTags> {
        payload.validate()?;
        let mut active = to_active(&payload);
        active.updated_at = Set(Utc::now());

        self.repo
            .update_with_children(id, active, &payload.tags)
            .await
            .map_err(|e| conflict_on_duplicate(e, "A post with this slug already exists"))
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo.delete_with_children(id).await?;
        info!(post_id = %id, "Blog post deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<BlogPostWithTags>> {
        Ok(self.repo.list_with_children().await?)
    }

    pub async fn list_published(&self) -> ServiceResult<Vec<BlogPostWithTags>> {
        Ok(self.repo.list_published().await?)
    }

    pub async fn tags(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.distinct_tags().await?)
    }
}

/// New posts published without a date are stamped with the current time.
fn initial_publish_date(p: &BlogPostPayload) -> Option<DateTime<Utc>> {
    p.publish_date
        .or_else(|| (p.status_or_default() == PUBLISHED_STATUS).then(Utc::now))
}

/// `publish_date` is left unset when the payload has none.
fn to_active(p: &BlogPostPayload) -> blog_post::ActiveModel {
    let mut active = blog_post::ActiveModel {
        title: Set(p.title.trim().to_string()),
        slug: Set(p.slug.trim().to_string()),
        content: Set(p.content.clone()),
        excerpt: Set(p.excerpt.clone()),
        featured_image: Set(p.featured_image.clone()),
        status: Set(p.status_or_default().to_string()),
        ..Default::default()
    };
    if let Some(date) = p.publish_date {
        active.publish_date = Set(Some(date));
    }
    active
}
