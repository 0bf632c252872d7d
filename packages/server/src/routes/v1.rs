use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{self, upload_body_limit};
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::health::health))
        .nest("/projects", project_routes())
        .nest("/experiences", experience_routes())
        .nest("/education", education_routes())
        .nest("/blog", blog_routes())
        .nest("/skills", skill_routes())
        .nest("/certificates", certificate_routes())
        .nest("/testimonials", testimonial_routes())
        .nest("/sections", section_routes())
        .nest("/social-links", social_link_routes())
        .nest("/settings", setting_routes())
}

fn project_routes() -> OpenApiRouter<AppState> {
    use handlers::project::*;

    OpenApiRouter::new()
        .routes(routes!(list_projects, create_project))
        .routes(routes!(list_project_tags))
        .routes(routes!(get_project, update_project, delete_project))
        .layer(upload_body_limit())
}

fn experience_routes() -> OpenApiRouter<AppState> {
    use handlers::experience::*;

    OpenApiRouter::new()
        .routes(routes!(list_experiences, create_experience))
        .routes(routes!(get_experience, update_experience, delete_experience))
}

fn education_routes() -> OpenApiRouter<AppState> {
    use handlers::education::*;

    OpenApiRouter::new()
        .routes(routes!(list_education, create_education))
        .routes(routes!(get_education, update_education, delete_education))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    use handlers::blog::*;

    OpenApiRouter::new()
        .routes(routes!(list_posts, create_post))
        .routes(routes!(list_published_posts))
        .routes(routes!(list_blog_tags))
        .routes(routes!(get_post_by_slug))
        .routes(routes!(get_post, update_post, delete_post))
}

fn skill_routes() -> OpenApiRouter<AppState> {
    use handlers::skill::*;

    OpenApiRouter::new()
        .routes(routes!(list_skills, create_skill))
        .routes(routes!(list_featured_skills))
        .routes(routes!(list_skills_by_category))
        .routes(routes!(get_skill, update_skill, delete_skill))
        .layer(upload_body_limit())
}

fn certificate_routes() -> OpenApiRouter<AppState> {
    use handlers::certificate::*;

    OpenApiRouter::new()
        .routes(routes!(list_certificates, create_certificate))
        .routes(routes!(get_certificate, update_certificate, delete_certificate))
        .layer(upload_body_limit())
}

fn testimonial_routes() -> OpenApiRouter<AppState> {
    use handlers::testimonial::*;

    OpenApiRouter::new()
        .routes(routes!(list_testimonials, create_testimonial))
        .routes(routes!(list_featured_testimonials))
        .routes(routes!(list_testimonials_by_status))
        .routes(routes!(get_testimonial, update_testimonial, delete_testimonial))
}

fn section_routes() -> OpenApiRouter<AppState> {
    use handlers::site::*;

    OpenApiRouter::new()
        .routes(routes!(list_sections, create_section))
        .routes(routes!(delete_section))
}

fn social_link_routes() -> OpenApiRouter<AppState> {
    use handlers::site::*;

    OpenApiRouter::new()
        .routes(routes!(list_social_links, create_social_link))
        .routes(routes!(delete_social_link))
}

fn setting_routes() -> OpenApiRouter<AppState> {
    use handlers::site::*;

    OpenApiRouter::new()
        .routes(routes!(list_settings, create_setting))
        .routes(routes!(delete_setting))
}
