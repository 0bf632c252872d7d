use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::skill::{NewSkill, SkillChanges, SkillResponse};
use crate::services::skill::SkillService;
use crate::state::AppState;
use crate::utils::multipart::MultipartForm;

fn service(state: &AppState) -> SkillService {
    SkillService::new(state.db.clone(), state.storage.clone())
}

fn respond(skills: Vec<crate::entity::skill::Model>) -> Json<Vec<SkillResponse>> {
    Json(skills.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Skills",
    operation_id = "listSkills",
    summary = "List skills",
    responses(
        (status = 200, description = "List of skills", body = Vec<SkillResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    Ok(respond(service(&state).list().await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Skills",
    operation_id = "createSkill",
    summary = "Create a skill",
    description = "Multipart form with `name` (required), `value` (0-100), `category` \
        (default `programming`), `display_order`, `is_featured` and an optional `icon` file \
        (jpg, jpeg, png, webp, svg, ico; max 5 MB).",
    request_body(content_type = "multipart/form-data", description = "Skill fields and optional icon"),
    responses(
        (status = 201, description = "Skill created", body = SkillResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Icon could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_skill(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = NewSkill::from_form(&form)?;
    let icon = form.take_file("icon");

    let created = service(&state).create_with_upload(input, icon).await?;
    Ok((StatusCode::CREATED, Json(SkillResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/featured",
    tag = "Skills",
    operation_id = "listFeaturedSkills",
    summary = "List featured skills",
    responses(
        (status = 200, description = "Featured skills", body = Vec<SkillResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_featured_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    Ok(respond(service(&state).featured().await?))
}

#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Skills",
    operation_id = "listSkillsByCategory",
    summary = "List skills in a category",
    params(("category" = String, Path, description = "Skill category, e.g. `programming`")),
    responses(
        (status = 200, description = "Skills in the category", body = Vec<SkillResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_skills_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    Ok(respond(service(&state).by_category(&category).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Skills",
    operation_id = "getSkill",
    summary = "Get a skill by ID",
    params(("id" = Uuid, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Skill details", body = SkillResponse),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_skill(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SkillResponse>, AppError> {
    Ok(Json(service(&state).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Skills",
    operation_id = "updateSkill",
    summary = "Update a skill",
    description = "Multipart form; blank or missing fields keep their stored value, `is_featured` \
        is always overwritten. A new `icon` replaces the stored one.",
    params(("id" = Uuid, Path, description = "Skill ID")),
    request_body(content_type = "multipart/form-data", description = "Changed fields and optional new icon"),
    responses(
        (status = 200, description = "Skill updated", body = SkillResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Icon could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_skill(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<SkillResponse>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let changes = SkillChanges::from_form(&form)?;
    let icon = form.take_file("icon");

    let updated = service(&state).update_with_upload(id, changes, icon).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Skills",
    operation_id = "deleteSkill",
    summary = "Delete a skill",
    params(("id" = Uuid, Path, description = "Skill ID")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
