use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::experience::{ExperiencePayload, ExperienceResponse};
use crate::services::experience::ExperienceService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Experiences",
    operation_id = "listExperiences",
    summary = "List experiences",
    description = "Returns every experience with its responsibilities and skills.",
    responses(
        (status = 200, description = "List of experiences", body = Vec<ExperienceResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExperienceResponse>>, AppError> {
    let list = ExperienceService::new(state.db).list().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Experiences",
    operation_id = "createExperience",
    summary = "Create an experience",
    description = "Creates the experience with its responsibilities and skills in one transaction. \
        Repeated skill names are stored once.",
    request_body = ExperiencePayload,
    responses(
        (status = 201, description = "Experience created", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_experience(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ExperiencePayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = ExperienceService::new(state.db).create(payload).await?;
    Ok((StatusCode::CREATED, Json(ExperienceResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Experiences",
    operation_id = "getExperience",
    summary = "Get an experience by ID",
    params(("id" = Uuid, Path, description = "Experience ID")),
    responses(
        (status = 200, description = "Experience details", body = ExperienceResponse),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_experience(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ExperienceResponse>, AppError> {
    Ok(Json(ExperienceService::new(state.db).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Experiences",
    operation_id = "updateExperience",
    summary = "Replace an experience",
    description = "Overwrites the experience and replaces both child collections with the submitted \
        ones. Empty arrays clear them.",
    params(("id" = Uuid, Path, description = "Experience ID")),
    request_body = ExperiencePayload,
    responses(
        (status = 200, description = "Experience updated", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_experience(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ExperiencePayload>,
) -> Result<Json<ExperienceResponse>, AppError> {
    let updated = ExperienceService::new(state.db).update(id, payload).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Experiences",
    operation_id = "deleteExperience",
    summary = "Delete an experience",
    params(("id" = Uuid, Path, description = "Experience ID")),
    responses(
        (status = 204, description = "Experience deleted"),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_experience(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    ExperienceService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
