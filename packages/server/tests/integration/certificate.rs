use crate::common::{FilePart, TestApp, routes};

#[tokio::test]
async fn create_requires_image() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::CERTIFICATES,
            &[("name", "AWS SA"), ("issue_date", "2024-05-01")],
            None,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
    assert!(app.get(routes::CERTIFICATES).await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_accepts_pdf_and_defaults_issuer() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::CERTIFICATES,
            &[("name", "AWS SA"), ("issue_date", "2024-05-01")],
            Some(FilePart::new("image", "cert.pdf", b"%PDF-1.7")),
        )
        .await;

    assert_eq!(res.status, 201, "create failed: {}", res.text);
    assert_eq!(res.body["issuer"], "-");
    assert_eq!(res.body["issue_date"], "2024-05-01");
    let url = res.body["image_url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/certificates/"));
    assert!(url.ends_with(".pdf"));
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app
        .post_multipart(
            routes::CERTIFICATES,
            &[("name", "AWS SA"), ("issue_date", "May 2024")],
            Some(FilePart::new("image", "cert.png", b"png")),
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(app.stored_count("certificates"), 0);
}

#[tokio::test]
async fn update_without_image_keeps_file_and_delete_removes_it() {
    let app = TestApp::spawn().await;
    let created = app
        .post_multipart(
            routes::CERTIFICATES,
            &[("name", "AWS SA"), ("issue_date", "2024-05-01")],
            Some(FilePart::new("image", "cert.png", b"png")),
        )
        .await;
    let id = created.id();
    let url = created.body["image_url"].as_str().unwrap().to_string();

    let res = app
        .put_multipart(&routes::certificate(id), &[("issuer", "Amazon")], None)
        .await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert_eq!(res.body["issuer"], "Amazon");
    assert_eq!(res.body["image_url"], url.as_str());

    assert_eq!(app.delete(&routes::certificate(id)).await.status, 204);
    assert!(!app.stored_path(&url).exists());
    assert_eq!(app.get(&routes::certificate(id)).await.status, 404);
}
