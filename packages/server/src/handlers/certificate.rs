use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::certificate::{CertificateChanges, CertificateResponse, NewCertificate};
use crate::services::certificate::CertificateService;
use crate::state::AppState;
use crate::utils::multipart::MultipartForm;

fn service(state: &AppState) -> CertificateService {
    CertificateService::new(state.db.clone(), state.storage.clone())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Certificates",
    operation_id = "listCertificates",
    summary = "List certificates",
    responses(
        (status = 200, description = "List of certificates", body = Vec<CertificateResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificateResponse>>, AppError> {
    let certificates = service(&state).list().await?;
    Ok(Json(certificates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Certificates",
    operation_id = "createCertificate",
    summary = "Create a certificate",
    description = "Multipart form with `name` (required), `issue_date` (`YYYY-MM-DD`), `issuer` \
        (default `-`), `credential_url`, `display_order` and a required `image` file \
        (jpg, jpeg, png, webp, pdf; max 10 MB).",
    request_body(content_type = "multipart/form-data", description = "Certificate fields and image"),
    responses(
        (status = 201, description = "Certificate created", body = CertificateResponse),
        (status = 400, description = "Validation error or missing image (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_certificate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = NewCertificate::from_form(&form)?;
    let image = form.take_file("image");

    let created = service(&state).create_with_upload(input, image).await?;
    Ok((StatusCode::CREATED, Json(CertificateResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Certificates",
    operation_id = "getCertificate",
    summary = "Get a certificate by ID",
    params(("id" = Uuid, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate details", body = CertificateResponse),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_certificate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CertificateResponse>, AppError> {
    Ok(Json(service(&state).get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Certificates",
    operation_id = "updateCertificate",
    summary = "Update a certificate",
    description = "Multipart form; blank or missing fields keep their stored value. The `image` \
        file is optional here and replaces the stored one when given.",
    params(("id" = Uuid, Path, description = "Certificate ID")),
    request_body(content_type = "multipart/form-data", description = "Changed fields and optional new image"),
    responses(
        (status = 200, description = "Certificate updated", body = CertificateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_certificate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<CertificateResponse>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let changes = CertificateChanges::from_form(&form)?;
    let image = form.take_file("image");

    let updated = service(&state).update_with_upload(id, changes, image).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Certificates",
    operation_id = "deleteCertificate",
    summary = "Delete a certificate",
    params(("id" = Uuid, Path, description = "Certificate ID")),
    responses(
        (status = 204, description = "Certificate deleted"),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_certificate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
