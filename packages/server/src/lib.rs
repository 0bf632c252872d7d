pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use common::StorageBackendKind;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio Portfolio API",
        version = "1.0.0",
        description = "Content API for a personal portfolio site"
    ),
    tags(
        (name = "Projects", description = "Projects with tags and an optional image"),
        (name = "Experiences", description = "Work experience with responsibilities and skills"),
        (name = "Education", description = "Education entries with achievements"),
        (name = "Blog", description = "Blog posts with tags"),
        (name = "Skills", description = "Skills with an optional icon"),
        (name = "Certificates", description = "Certificates with an image or PDF"),
        (name = "Testimonials", description = "Client and colleague testimonials"),
        (name = "Sections", description = "Toggleable page sections"),
        (name = "Social Links", description = "Links to external profiles"),
        (name = "Settings", description = "Site-wide key/value settings"),
        (name = "Health", description = "Service health"),
    ),
)]
struct ApiDoc;

/// The OpenAPI document for every registered route.
pub fn openapi() -> utoipa::openapi::OpenApi {
    api_router().split_for_parts().1
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi()).nest("/api", routes::api_routes())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = api_router().split_for_parts();
    let cors = cors_layer(&state.config.server.cors);

    let mut router = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api));

    let storage = &state.config.storage;
    if storage.backend == StorageBackendKind::Local {
        let files = ServeDir::new(&storage.local.base_dir);
        router = match storage.local.mount_prefix().as_str() {
            // Root mounts serve whatever the API routes don't match.
            "" => router.fallback_service(files),
            prefix => router.nest_service(prefix, files),
        };
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
