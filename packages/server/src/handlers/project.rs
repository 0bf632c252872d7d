use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::project::{NewProject, ProjectChanges, ProjectResponse};
use crate::services::project::ProjectService;
use crate::state::AppState;
use crate::utils::multipart::MultipartForm;

fn service(state: &AppState) -> ProjectService {
    ProjectService::new(state.db.clone(), state.storage.clone())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects",
    description = "Returns all projects with their tags, ordered by `display_order`, newest first within the same order.",
    responses(
        (status = 200, description = "List of projects", body = Vec<ProjectResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let projects = service(&state).list().await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    description = "Multipart form with `title`, `description`, `code_url` (required), `demo_url`, \
        `display_order`, `is_featured`, `status` (default `published`), `tags` (JSON array or comma \
        list) and an optional `image` file (jpg, jpeg, png, webp; max 10 MB).",
    request_body(content_type = "multipart/form-data", description = "Project fields and optional image"),
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = NewProject::from_form(&form)?;
    let image = form.take_file("image");

    let created = service(&state).create_with_upload(input, image).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/tags",
    tag = "Projects",
    operation_id = "listProjectTags",
    summary = "List project tags",
    description = "Returns every distinct tag name used by any project, alphabetically.",
    responses(
        (status = 200, description = "Tag names", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_project_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(service(&state).tags().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project by ID",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ProjectResponse>, AppError> {
    Ok(Json(service(&state).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Update a project",
    description = "Multipart form; blank or missing text fields keep their stored value, \
        `is_featured` is always overwritten. A `tags` field replaces the whole tag set, omitting it \
        keeps the existing tags. A new `image` replaces the stored one; without it the image is kept.",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body(content_type = "multipart/form-data", description = "Changed fields and optional new image"),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_project(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<ProjectResponse>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let changes = ProjectChanges::from_form(&form)?;
    let image = form.take_file("image");

    let updated = service(&state).update_with_upload(id, changes, image).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    description = "Deletes the project and its tags, then removes its image from storage.",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
