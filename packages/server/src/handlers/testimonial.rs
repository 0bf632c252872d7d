use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::testimonial;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::testimonial::{TestimonialPayload, TestimonialResponse};
use crate::services::testimonial::TestimonialService;
use crate::state::AppState;

fn respond(list: Vec<testimonial::Model>) -> Json<Vec<TestimonialResponse>> {
    Json(list.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Testimonials",
    operation_id = "listTestimonials",
    summary = "List testimonials",
    responses(
        (status = 200, description = "All testimonials", body = Vec<TestimonialResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    Ok(respond(TestimonialService::new(state.db).list().await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Testimonials",
    operation_id = "createTestimonial",
    summary = "Create a testimonial",
    description = "`rating` defaults to 5 and `status` to `approved`.",
    request_body = TestimonialPayload,
    responses(
        (status = 201, description = "Testimonial created", body = TestimonialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_testimonial(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TestimonialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = TestimonialService::new(state.db).create(payload).await?;
    Ok((StatusCode::CREATED, Json(TestimonialResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/featured",
    tag = "Testimonials",
    operation_id = "listFeaturedTestimonials",
    summary = "List featured testimonials",
    description = "Only approved testimonials are returned.",
    responses(
        (status = 200, description = "Featured testimonials", body = Vec<TestimonialResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_featured_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    Ok(respond(TestimonialService::new(state.db).featured().await?))
}

#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = "Testimonials",
    operation_id = "listTestimonialsByStatus",
    summary = "List testimonials by moderation status",
    params(("status" = String, Path, description = "`pending`, `approved` or `rejected`")),
    responses(
        (status = 200, description = "Testimonials in that status", body = Vec<TestimonialResponse>),
        (status = 400, description = "Unknown status (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_testimonials_by_status(
    State(state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    Ok(respond(
        TestimonialService::new(state.db).by_status(&status).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "getTestimonial",
    summary = "Get a testimonial by ID",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial details", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_testimonial(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<TestimonialResponse>, AppError> {
    Ok(Json(TestimonialService::new(state.db).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "updateTestimonial",
    summary = "Replace a testimonial",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body = TestimonialPayload,
    responses(
        (status = 200, description = "Testimonial updated", body = TestimonialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_testimonial(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<TestimonialPayload>,
) -> Result<Json<TestimonialResponse>, AppError> {
    let updated = TestimonialService::new(state.db).update(id, payload).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "deleteTestimonial",
    summary = "Delete a testimonial",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    TestimonialService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
