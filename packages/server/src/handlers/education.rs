use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::education::{EducationPayload, EducationResponse};
use crate::services::education::EducationService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Education",
    operation_id = "listEducation",
    summary = "List education entries",
    responses(
        (status = 200, description = "Education entries with achievements", body = Vec<EducationResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_education(
    State(state): State<AppState>,
) -> Result<Json<Vec<EducationResponse>>, AppError> {
    let list = EducationService::new(state.db).list().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Education",
    operation_id = "createEducation",
    summary = "Create an education entry",
    request_body = EducationPayload,
    responses(
        (status = 201, description = "Education created", body = EducationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(school = %payload.school))]
pub async fn create_education(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EducationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = EducationService::new(state.db).create(payload).await?;
    Ok((StatusCode::CREATED, Json(EducationResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Education",
    operation_id = "getEducation",
    summary = "Get an education entry by ID",
    params(("id" = Uuid, Path, description = "Education ID")),
    responses(
        (status = 200, description = "Education details", body = EducationResponse),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_education(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<EducationResponse>, AppError> {
    Ok(Json(EducationService::new(state.db).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Education",
    operation_id = "updateEducation",
    summary = "Replace an education entry",
    description = "Overwrites the entry and replaces its achievements with the submitted ones.",
    params(("id" = Uuid, Path, description = "Education ID")),
    request_body = EducationPayload,
    responses(
        (status = 200, description = "Education updated", body = EducationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_education(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<EducationPayload>,
) -> Result<Json<EducationResponse>, AppError> {
    let updated = EducationService::new(state.db).update(id, payload).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Education",
    operation_id = "deleteEducation",
    summary = "Delete an education entry",
    params(("id" = Uuid, Path, description = "Education ID")),
    responses(
        (status = 204, description = "Education deleted"),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_education(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    EducationService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
