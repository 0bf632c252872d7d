//! Health, education, testimonials and the site configuration resources.

use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::HEALTH).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;
    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/v1/health"].is_object());
}

#[tokio::test]
async fn education_update_replaces_achievements() {
    let app = TestApp::spawn().await;
    let body = json!({
        "school": "MIT",
        "degree": "BSc",
        "start_year": 2015,
        "end_year": 2019,
        "achievements": [{ "achievement": "Dean's list" }, { "achievement": "Thesis award" }]
    });
    let res = app.post(routes::EDUCATION, &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    assert_eq!(res.body["achievements"].as_array().unwrap().len(), 2);
    let id = res.id();

    let mut changed = body.clone();
    changed["achievements"] = json!([]);
    let res = app.put(&routes::education(id), &changed).await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert!(res.body["achievements"].as_array().unwrap().is_empty());

    assert_eq!(app.delete(&routes::education(id)).await.status, 204);
    assert_eq!(app.delete(&routes::education(id)).await.status, 404);
}

#[tokio::test]
async fn featured_testimonials_are_approved_only() {
    let app = TestApp::spawn().await;
    for (name, status) in [("Ada", "approved"), ("Bob", "pending")] {
        let res = app
            .post(
                routes::TESTIMONIALS,
                &json!({
                    "name": name,
                    "message": "Great to work with",
                    "is_featured": true,
                    "status": status
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        assert_eq!(res.body["rating"], 5);
    }

    let featured = app.get(routes::TESTIMONIALS_FEATURED).await;
    let names: Vec<_> = featured.body.as_array().unwrap().iter().map(|t| &t["name"]).collect();
    assert_eq!(names, vec!["Ada"]);

    let pending = app.get(&routes::testimonials_with_status("pending")).await;
    assert_eq!(pending.body.as_array().unwrap().len(), 1);

    assert_eq!(app.get(&routes::testimonials_with_status("spam")).await.status, 400);
}

#[tokio::test]
async fn testimonial_round_trip() {
    let app = TestApp::spawn().await;
    let id = app
        .post(
            routes::TESTIMONIALS,
            &json!({ "name": "Ada", "message": "Great to work with" }),
        )
        .await
        .id();

    let res = app.get(&routes::testimonial(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "approved");

    let res = app
        .put(
            &routes::testimonial(id),
            &json!({ "name": "Ada", "message": "Even better", "rating": 4 }),
        )
        .await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert_eq!(res.body["rating"], 4);

    assert_eq!(app.delete(&routes::testimonial(id)).await.status, 204);
    assert_eq!(app.get(&routes::testimonial(id)).await.status, 404);
}

#[tokio::test]
async fn testimonial_rating_is_bounded() {
    let app = TestApp::spawn().await;
    let res = app
        .post(
            routes::TESTIMONIALS,
            &json!({ "name": "Ada", "message": "Hi", "rating": 6 }),
        )
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn setting_keys_are_unique() {
    let app = TestApp::spawn().await;
    let body = json!({ "key": "site_title", "value": "My Folio" });

    let res = app.post(routes::SETTINGS, &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    assert_eq!(res.body["data_type"], "string");
    let id = res.id();

    let res = app.post(routes::SETTINGS, &body).await;
    assert_eq!(res.status, 409);

    assert_eq!(app.delete(&routes::setting(id)).await.status, 204);
    assert!(app.get(routes::SETTINGS).await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sections_and_social_links_round_through_the_api() {
    let app = TestApp::spawn().await;
    let section = app
        .post(
            routes::SECTIONS,
            &json!({ "section_key": "about", "label": "About me" }),
        )
        .await;
    assert_eq!(section.status, 201, "create failed: {}", section.text);
    assert_eq!(section.body["is_active"], true);

    let dup = app
        .post(
            routes::SECTIONS,
            &json!({ "section_key": "about", "label": "Again" }),
        )
        .await;
    assert_eq!(dup.status, 409);

    let link = app
        .post(
            routes::SOCIAL_LINKS,
            &json!({ "platform": "github", "url": "https://github.com/someone" }),
        )
        .await;
    assert_eq!(link.status, 201, "create failed: {}", link.text);

    assert_eq!(app.get(routes::SOCIAL_LINKS).await.body.as_array().unwrap().len(), 1);
    assert_eq!(app.delete(&routes::social_link(link.id())).await.status, 204);
    assert_eq!(app.delete(&routes::section(section.id())).await.status, 204);
    assert_eq!(app.delete(&routes::section(section.id())).await.status, 404);
}
