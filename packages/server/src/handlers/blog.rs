use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blog::{BlogPostPayload, BlogPostResponse};
use crate::repository::blog::BlogPostWithTags;
use crate::services::blog::BlogService;
use crate::state::AppState;

fn respond(posts: Vec<BlogPostWithTags>) -> Json<Vec<BlogPostResponse>> {
    Json(posts.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "listBlogPosts",
    summary = "List all blog posts",
    description = "Returns posts in every status, newest publish date first.",
    responses(
        (status = 200, description = "Blog posts", body = Vec<BlogPostResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    Ok(respond(BlogService::new(state.db).list().await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blog",
    operation_id = "createBlogPost",
    summary = "Create a blog post",
    description = "Status defaults to `draft`. Publishing without a `publish_date` stamps the current time.",
    request_body = BlogPostPayload,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(slug = %payload.slug))]
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogPostPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = BlogService::new(state.db).create(payload).await?;
    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/published",
    tag = "Blog",
    operation_id = "listPublishedBlogPosts",
    summary = "List published blog posts",
    responses(
        (status = 200, description = "Published posts", body = Vec<BlogPostResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_published_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    Ok(respond(BlogService::new(state.db).list_published().await?))
}

#[utoipa::path(
    get,
    path = "/tags",
    tag = "Blog",
    operation_id = "listBlogTags",
    summary = "List blog tags",
    responses(
        (status = 200, description = "Distinct tag names", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_tags(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(BlogService::new(state.db).tags().await?))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Blog",
    operation_id = "getBlogPostBySlug",
    summary = "Read a blog post by slug",
    description = "Returns the post and increments its view count.",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<BlogPostResponse>, AppError> {
    Ok(Json(BlogService::new(state.db).get_by_slug(&slug).await?.into()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blog",
    operation_id = "getBlogPost",
    summary = "Get a blog post by ID",
    description = "Returns the post and increments its view count.",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<BlogPostResponse>, AppError> {
    Ok(Json(BlogService::new(state.db).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blog",
    operation_id = "updateBlogPost",
    summary = "Replace a blog post",
    description = "Overwrites the post and replaces its tags with the submitted ones. \
        An omitted `publish_date` keeps the stored one.",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = BlogPostPayload,
    responses(
        (status = 200, description = "Post updated", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<BlogPostPayload>,
) -> Result<Json<BlogPostResponse>, AppError> {
    Ok(Json(BlogService::new(state.db).update(id, payload).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blog",
    operation_id = "deleteBlogPost",
    summary = "Delete a blog post",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    BlogService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
