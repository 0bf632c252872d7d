use crate::common::{FilePart, TestApp, routes};

#[tokio::test]
async fn create_defaults_category_and_stores_icon() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::SKILLS,
            &[("name", "Rust"), ("value", "90"), ("is_featured", "true")],
            Some(FilePart::new("icon", "rust.svg", b"<svg/>")),
        )
        .await;

    assert_eq!(res.status, 201, "create failed: {}", res.text);
    assert_eq!(res.body["category"], "programming");
    assert_eq!(res.body["value"], 90);
    let icon = res.body["icon_url"].as_str().unwrap();
    assert!(icon.starts_with("/uploads/skills/"));
    assert!(app.stored_path(icon).exists());
}

#[tokio::test]
async fn value_out_of_range_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(routes::SKILLS, &[("name", "Rust"), ("value", "101")], None)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn featured_and_category_listings_filter() {
    let app = TestApp::spawn().await;
    for (name, category, featured) in [
        ("Rust", "programming", "true"),
        ("Figma", "design", "false"),
        ("Postgres", "database", "true"),
    ] {
        let res = app
            .post_multipart(
                routes::SKILLS,
                &[
                    ("name", name),
                    ("value", "80"),
                    ("category", category),
                    ("is_featured", featured),
                ],
                None,
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
    }

    let featured = app.get(routes::SKILLS_FEATURED).await;
    assert_eq!(featured.status, 200);
    assert_eq!(featured.body.as_array().unwrap().len(), 2);

    let design = app.get(&routes::skills_in_category("design")).await;
    let names: Vec<_> = design.body.as_array().unwrap().iter().map(|s| &s["name"]).collect();
    assert_eq!(names, vec!["Figma"]);

    assert_eq!(app.get(routes::SKILLS).await.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_removes_icon() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::SKILLS,
            &[("name", "Rust"), ("value", "90")],
            Some(FilePart::new("icon", "rust.png", b"png")),
        )
        .await;
    let id = res.id();
    let icon = res.body["icon_url"].as_str().unwrap().to_string();

    let res = app.delete(&routes::skill(id)).await;
    assert_eq!(res.status, 204);
    assert!(!app.stored_path(&icon).exists());
    assert_eq!(app.delete(&routes::skill(id)).await.status, 404);
}
