use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::site::{
    SectionPayload, SectionResponse, SettingPayload, SettingResponse, SocialLinkPayload,
    SocialLinkResponse,
};
use crate::services::site::SiteService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Sections",
    operation_id = "listSections",
    summary = "List page sections",
    responses(
        (status = 200, description = "Sections in display order", body = Vec<SectionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let list = SiteService::new(state.db).list_sections().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Sections",
    operation_id = "createSection",
    summary = "Create a page section",
    request_body = SectionPayload,
    responses(
        (status = 201, description = "Section created", body = SectionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Section key already exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(section_key = %payload.section_key))]
pub async fn create_section(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = SiteService::new(state.db).create_section(payload).await?;
    Ok((StatusCode::CREATED, Json(SectionResponse::from(created))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Sections",
    operation_id = "deleteSection",
    summary = "Delete a page section",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 404, description = "Section not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_section(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    SiteService::new(state.db).delete_section(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Social Links",
    operation_id = "listSocialLinks",
    summary = "List social links",
    responses(
        (status = 200, description = "Social links in display order", body = Vec<SocialLinkResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_social_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<SocialLinkResponse>>, AppError> {
    let list = SiteService::new(state.db).list_social_links().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Social Links",
    operation_id = "createSocialLink",
    summary = "Create a social link",
    request_body = SocialLinkPayload,
    responses(
        (status = 201, description = "Social link created", body = SocialLinkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(platform = %payload.platform))]
pub async fn create_social_link(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SocialLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = SiteService::new(state.db).create_social_link(payload).await?;
    Ok((StatusCode::CREATED, Json(SocialLinkResponse::from(created))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Social Links",
    operation_id = "deleteSocialLink",
    summary = "Delete a social link",
    params(("id" = Uuid, Path, description = "Social link ID")),
    responses(
        (status = 204, description = "Social link deleted"),
        (status = 404, description = "Social link not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_social_link(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    SiteService::new(state.db).delete_social_link(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Settings",
    operation_id = "listSettings",
    summary = "List site settings",
    responses(
        (status = 200, description = "Settings ordered by key", body = Vec<SettingResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<SettingResponse>>, AppError> {
    let list = SiteService::new(state.db).list_settings().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Settings",
    operation_id = "createSetting",
    summary = "Create a site setting",
    description = "`data_type` defaults to `string`.",
    request_body = SettingPayload,
    responses(
        (status = 201, description = "Setting created", body = SettingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Key already exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(key = %payload.key))]
pub async fn create_setting(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SettingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = SiteService::new(state.db).create_setting(payload).await?;
    Ok((StatusCode::CREATED, Json(SettingResponse::from(created))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Settings",
    operation_id = "deleteSetting",
    summary = "Delete a site setting",
    params(("id" = Uuid, Path, description = "Setting ID")),
    responses(
        (status = 204, description = "Setting deleted"),
        (status = 404, description = "Setting not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_setting(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    SiteService::new(state.db).delete_setting(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
