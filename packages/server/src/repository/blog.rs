use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, LockType, NullOrdering, OnConflict, Order};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{RepoResult, RepositoryError, group_by_parent, inserted_or_ignored};
use crate::entity::{blog_post, blog_tag};
use crate::models::blog::{BlogTagPayload, PUBLISHED_STATUS};

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostWithTags {
    pub post: blog_post::Model,
    pub tags: Vec<blog_tag::Model>,
}

pub struct BlogRepository {
    db: DatabaseConnection,
}

impl BlogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_with_children(
        &self,
        post: blog_post::ActiveModel,
        tags: &[BlogTagPayload],
    ) -> RepoResult<BlogPostWithTags> {
        let txn = self.db.begin().await?;

        let post = post.insert(&txn).await?;
        insert_tags(&txn, post.id, tags).await?;
        let tags = load_tags(&txn, post.id).await?;

        txn.commit().await?;
        Ok(BlogPostWithTags { post, tags })
    }

    pub async fn get_by_id_with_children(&self, id: Uuid) -> RepoResult<BlogPostWithTags> {
        let post = blog_post::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Blog post"))?;
        let tags = load_tags(&self.db, id).await?;
        Ok(BlogPostWithTags { post, tags })
    }

    pub async fn get_by_slug_with_children(&self, slug: &str) -> RepoResult<BlogPostWithTags> {
        let post = blog_post::Entity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Blog post"))?;
        let tags = load_tags(&self.db, post.id).await?;
        Ok(BlogPostWithTags { post, tags })
    }

    /// Overwrite the post and replace its tags wholesale.
    ///
    /// An unset `publish_date` keeps the stored one. A post becoming published
    /// with no stored date is stamped with the current time.
    pub async fn update_with_children(
        &self,
        id: Uuid,
        mut post: blog_post::ActiveModel,
        tags: &[BlogTagPayload],
    ) -> RepoResult<BlogPostWithTags> {
        post.id = Set(id);
        let txn = self.db.begin().await?;

        let existing = find_for_update(&txn, id).await?;
        if post.publish_date.is_not_set()
            && existing.publish_date.is_none()
            && matches!(&post.status, ActiveValue::Set(s) if s == PUBLISHED_STATUS)
        {
            post.publish_date = Set(Some(Utc::now()));
        }
        let post = post.update(&txn).await?;

        blog_tag::Entity::delete_many()
            .filter(blog_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        insert_tags(&txn, id, tags).await?;
        let tags = load_tags(&txn, id).await?;

        txn.commit().await?;
        Ok(BlogPostWithTags { post, tags })
    }

    pub async fn delete_with_children(&self, id: Uuid) -> RepoResult<()> {
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        blog_tag::Entity::delete_many()
            .filter(blog_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        blog_post::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn list_with_children(&self) -> RepoResult<Vec<BlogPostWithTags>> {
        self.attach_tags(newest_first(blog_post::Entity::find()))
            .await
    }

    pub async fn list_published(&self) -> RepoResult<Vec<BlogPostWithTags>> {
        self.attach_tags(
            newest_first(blog_post::Entity::find())
                .filter(blog_post::Column::Status.eq(PUBLISHED_STATUS)),
        )
        .await
    }

    /// Atomically bump the view counter. Returns whether a row was touched.
    pub async fn increment_view_count(&self, id: Uuid) -> RepoResult<bool> {
        let res = blog_post::Entity::update_many()
            .col_expr(
                blog_post::Column::ViewCount,
                Expr::col(blog_post::Column::ViewCount).add(1),
            )
            .filter(blog_post::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn distinct_tags(&self) -> RepoResult<Vec<String>> {
        Ok(blog_tag::Entity::find()
            .select_only()
            .column(blog_tag::Column::Name)
            .distinct()
            .order_by_asc(blog_tag::Column::Name)
            .into_tuple::<String>()
            .all(&self.db)
            .await?)
    }

    async fn attach_tags(
        &self,
        query: Select<blog_post::Entity>,
    ) -> RepoResult<Vec<BlogPostWithTags>> {
        let posts = query.all(&self.db).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let tags = blog_tag::Entity::find()
            .filter(blog_tag::Column::PostId.is_in(ids))
            .order_by_asc(blog_tag::Column::DisplayOrder)
            .order_by_asc(blog_tag::Column::Name)
            .all(&self.db)
            .await?;
        let mut tags = group_by_parent(tags, |t| t.post_id);

        Ok(posts
            .into_iter()
            .map(|post| BlogPostWithTags {
                tags: tags.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect())
    }
}

fn newest_first(query: Select<blog_post::Entity>) -> Select<blog_post::Entity> {
    query
        .order_by_with_nulls(blog_post::Column::PublishDate, Order::Desc, NullOrdering::Last)
        .order_by_desc(blog_post::Column::CreatedAt)
}

async fn find_for_update<C: ConnectionTrait>(conn: &C, id: Uuid) -> RepoResult<blog_post::Model> {
    blog_post::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(RepositoryError::NotFound("Blog post"))
}

async fn insert_tags<C: ConnectionTrait>(
    conn: &C,
    post_id: Uuid,
    tags: &[BlogTagPayload],
) -> RepoResult<()> {
    if tags.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = tags.iter().map(|t| blog_tag::ActiveModel {
        id: Set(Uuid::now_v7()),
        post_id: Set(post_id),
        name: Set(t.name.trim().to_string()),
        display_order: Set(t.display_order),
        created_at: Set(now),
    });

    let inserted = inserted_or_ignored(
        blog_tag::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([blog_tag::Column::PostId, blog_tag::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await,
    )?;
    if inserted < tags.len() as u64 {
        debug!(%post_id, submitted = tags.len(), inserted, "Ignored duplicate blog tags");
    }
    Ok(())
}

async fn load_tags<C: ConnectionTrait>(conn: &C, post_id: Uuid) -> RepoResult<Vec<blog_tag::Model>> {
    Ok(blog_tag::Entity::find()
        .filter(blog_tag::Column::PostId.eq(post_id))
        .order_by_asc(blog_tag::Column::DisplayOrder)
        .order_by_asc(blog_tag::Column::Name)
        .all(conn)
        .await?)
}
