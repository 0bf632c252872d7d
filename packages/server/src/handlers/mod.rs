pub mod blog;
pub mod certificate;
pub mod education;
pub mod experience;
pub mod health;
pub mod project;
pub mod site;
pub mod skill;
pub mod testimonial;

use axum::extract::DefaultBodyLimit;

/// Body limit for multipart routes: the largest upload policy (10 MB) plus form fields.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(12 * 1024 * 1024)
}
