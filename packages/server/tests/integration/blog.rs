use serde_json::json;

use crate::common::{TestApp, routes};

fn post_body(slug: &str, status: &str) -> serde_json::Value {
    json!({
        "title": "Hello",
        "slug": slug,
        "content": "First post",
        "status": status,
        "tags": [{ "name": "rust" }, { "name": "web", "display_order": 1 }]
    })
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::BLOG, &post_body("hello-world", "draft")).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);

    let res = app.post(routes::BLOG, &post_body("hello-world", "draft")).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "CONFLICT");
}

#[tokio::test]
async fn bad_slug_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::BLOG, &post_body("Hello World", "draft")).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn reading_by_slug_counts_views() {
    let app = TestApp::spawn().await;
    let id = app
        .post(routes::BLOG, &post_body("counted", "published"))
        .await
        .id();

    let first = app.get(&routes::blog_slug("counted")).await;
    assert_eq!(first.status, 200);
    assert_eq!(first.body["view_count"], 1);
    assert_eq!(first.body["tags"].as_array().unwrap().len(), 2);

    app.get(&routes::blog_slug("counted")).await;
    let by_id = app.get(&routes::blog_post(id)).await;
    assert_eq!(by_id.body["view_count"], 3);

    assert_eq!(app.get(&routes::blog_slug("missing")).await.status, 404);
}

#[tokio::test]
async fn publishing_stamps_date_and_published_list_filters() {
    let app = TestApp::spawn().await;
    let published = app.post(routes::BLOG, &post_body("live", "published")).await;
    assert!(published.body["publish_date"].is_string());

    let draft = app.post(routes::BLOG, &post_body("wip", "draft")).await;
    assert!(draft.body["publish_date"].is_null());

    let res = app.get(routes::BLOG_PUBLISHED).await;
    let slugs: Vec<_> = res.body.as_array().unwrap().iter().map(|p| &p["slug"]).collect();
    assert_eq!(slugs, vec!["live"]);

    assert_eq!(app.get(routes::BLOG).await.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_tags_and_tags_endpoint_is_distinct() {
    let app = TestApp::spawn().await;
    let id = app.post(routes::BLOG, &post_body("one", "draft")).await.id();
    app.post(routes::BLOG, &post_body("two", "draft")).await;

    let mut body = post_body("one", "draft");
    body["tags"] = json!([{ "name": "axum" }]);
    let res = app.put(&routes::blog_post(id), &body).await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert_eq!(res.body["tags"].as_array().unwrap().len(), 1);

    let tags = app.get(routes::BLOG_TAGS).await;
    let mut names: Vec<&str> = tags
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["axum", "rust", "web"]);

    assert_eq!(app.delete(&routes::blog_post(id)).await.status, 204);
    assert_eq!(app.get(&routes::blog_post(id)).await.status, 404);
}

#[tokio::test]
async fn update_without_date_keeps_publish_date() {
    let app = TestApp::spawn().await;
    let created = app.post(routes::BLOG, &post_body("dated", "published")).await;
    let stamped = created.body["publish_date"].clone();
    assert!(stamped.is_string());

    let mut body = post_body("dated", "published");
    body["title"] = json!("Hello, edited");
    let res = app.put(&routes::blog_post(created.id()), &body).await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);
    assert_eq!(res.body["publish_date"], stamped);

    let draft = app.post(routes::BLOG, &post_body("later", "draft")).await;
    let res = app
        .put(&routes::blog_post(draft.id()), &post_body("later", "published"))
        .await;
    assert!(res.body["publish_date"].is_string());
}
