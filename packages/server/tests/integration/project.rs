use uuid::Uuid;

use crate::common::{FilePart, TestApp, routes};

#[tokio::test]
async fn create_stores_image_and_serves_it() {
    let app = TestApp::spawn().await;
    let (_, url) = app.create_project_with_image("Folio").await;

    assert!(url.starts_with("/uploads/projects/"));
    assert!(url.ends_with(".png"));
    assert!(app.stored_path(&url).exists());

    let res = app.get(&url).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.text.as_bytes(), b"PNG fake");
}

#[tokio::test]
async fn create_without_image_has_null_image_url() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::PROJECTS,
            &[
                ("title", "Plain"),
                ("description", "No screenshot"),
                ("code_url", "https://git.example.com/plain"),
            ],
            None,
        )
        .await;

    assert_eq!(res.status, 201, "create failed: {}", res.text);
    assert!(res.body["image_url"].is_null());
    assert_eq!(res.body["status"], "published");
    assert!(res.body["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_without_file_keeps_image_and_tags() {
    let app = TestApp::spawn().await;
    let (id, url) = app.create_project_with_image("Folio").await;

    let res = app
        .put_multipart(&routes::project(id), &[("title", "Folio v2")], None)
        .await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert_eq!(res.body["title"], "Folio v2");
    assert_eq!(res.body["image_url"], url.as_str());
    assert_eq!(res.body["tags"].as_array().unwrap().len(), 2);
    assert!(app.stored_path(&url).exists());
}

#[tokio::test]
async fn update_with_file_replaces_old_image() {
    let app = TestApp::spawn().await;
    let (id, old_url) = app.create_project_with_image("Folio").await;

    let res = app
        .put_multipart(
            &routes::project(id),
            &[("tags", "rust")],
            Some(FilePart::new("image", "new.webp", b"webp")),
        )
        .await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);

    let new_url = res.body["image_url"].as_str().unwrap();
    assert_ne!(new_url, old_url);
    assert!(app.stored_path(new_url).exists());
    assert!(!app.stored_path(&old_url).exists());
    assert_eq!(res.body["tags"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn disallowed_extension_is_rejected_before_storing() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::PROJECTS,
            &[
                ("title", "Folio"),
                ("description", "CMS"),
                ("code_url", "https://git.example.com/folio"),
            ],
            Some(FilePart::new("image", "payload.exe", b"MZ")),
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(app.stored_count("projects"), 0);
    assert!(app.get(routes::PROJECTS).await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_row_and_file() {
    let app = TestApp::spawn().await;
    let (id, url) = app.create_project_with_image("Folio").await;

    let res = app.delete(&routes::project(id)).await;
    assert_eq!(res.status, 204);
    assert!(!app.stored_path(&url).exists());
    assert_eq!(app.get(&routes::project(id)).await.status, 404);

    let res = app.delete(&routes::project(Uuid::new_v4())).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn tags_endpoint_lists_distinct_names() {
    let app = TestApp::spawn().await;
    app.create_project_with_image("One").await;
    app.create_project_with_image("Two").await;

    let res = app.get(routes::PROJECT_TAGS).await;
    assert_eq!(res.status, 200);
    let mut tags: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    tags.sort();
    assert_eq!(tags, vec!["axum", "rust"]);
}
