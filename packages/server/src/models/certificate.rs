use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::shared::{non_blank, optional_text, require_text, validate_display_order};
use crate::entity::certificate;
use crate::error::AppError;
use crate::services::ServiceError;
use crate::utils::multipart::MultipartForm;

pub const DEFAULT_ISSUER: &str = "-";

/// Parse an optional `YYYY-MM-DD` form field.
fn parse_date(form: &MultipartForm, name: &str) -> Result<Option<NaiveDate>, AppError> {
    form.text(name)
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| {
                AppError::Validation(format!("{name} must be a date in YYYY-MM-DD format"))
            })
        })
        .transpose()
}

#[derive(Debug, Clone, Default)]
pub struct NewCertificate {
    pub name: String,
    pub issue_date: Option<NaiveDate>,
    pub issuer: Option<String>,
    pub credential_url: Option<String>,
    pub display_order: i32,
}

impl NewCertificate {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            name: form.text_or_empty("name"),
            issue_date: parse_date(form, "issue_date")?,
            issuer: form.text("issuer").map(str::to_string),
            credential_url: form.text("credential_url").map(str::to_string),
            display_order: form.parse("display_order")?.unwrap_or(0),
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.name, "name", 256)?;
        optional_text(self.issuer.as_deref(), "issuer", 256)?;
        optional_text(self.credential_url.as_deref(), "credential_url", 2048)?;
        validate_display_order(self.display_order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CertificateChanges {
    pub name: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub issuer: Option<String>,
    pub credential_url: Option<String>,
    pub display_order: Option<i32>,
}

impl CertificateChanges {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            name: non_blank(form.text("name")),
            issue_date: parse_date(form, "issue_date")?,
            issuer: non_blank(form.text("issuer")),
            credential_url: non_blank(form.text("credential_url")),
            display_order: form.parse("display_order")?,
        })
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            require_text(name, "name", 256)?;
        }
        optional_text(self.issuer.as_deref(), "issuer", 256)?;
        optional_text(self.credential_url.as_deref(), "credential_url", 2048)?;
        if let Some(order) = self.display_order {
            validate_display_order(order)?;
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CertificateResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    #[schema(example = "2024-05-01")]
    pub issue_date: Option<NaiveDate>,
    pub issuer: String,
    pub credential_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<certificate::Model> for CertificateResponse {
    fn from(m: certificate::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            image_url: m.image_url,
            issue_date: m.issue_date,
            issuer: m.issuer,
            credential_url: m.credential_url,
            display_order: m.display_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_date_must_be_iso() {
        let form = MultipartForm::with_fields(&[("name", "AWS SA"), ("issue_date", "2024-05-01")]);
        let cert = NewCertificate::from_form(&form).unwrap();
        assert_eq!(cert.issue_date, NaiveDate::from_ymd_opt(2024, 5, 1));

        let form = MultipartForm::with_fields(&[("name", "AWS SA"), ("issue_date", "01/05/2024")]);
        assert!(NewCertificate::from_form(&form).is_err());
    }
}
