use folio_server::entity::{experience_responsibility, experience_skill};
use sea_orm::EntityTrait;
use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

fn experience_body() -> serde_json::Value {
    json!({
        "title": "Backend Engineer",
        "company": "Acme",
        "location": "Remote",
        "start_year": 2021,
        "current_job": true,
        "responsibilities": [
            { "description": "Own the billing API", "display_order": 0 },
            { "description": "Mentor new hires", "display_order": 1 }
        ],
        "skills": [
            { "skill_name": "Rust", "display_order": 0 },
            { "skill_name": "Postgres", "display_order": 1 },
            { "skill_name": "Rust", "display_order": 2 }
        ]
    })
}

#[tokio::test]
async fn create_ignores_duplicate_skills() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::EXPERIENCES, &experience_body()).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);

    let skills = res.body["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["skill_name"], "Rust");
    assert_eq!(skills[1]["skill_name"], "Postgres");
    assert_eq!(res.body["responsibilities"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_children_even_when_empty() {
    let app = TestApp::spawn().await;
    let id = app.post(routes::EXPERIENCES, &experience_body()).await.id();

    let mut body = experience_body();
    body["title"] = json!("Staff Engineer");
    body["responsibilities"] = json!([]);
    body["skills"] = json!([{ "skill_name": "Go" }]);
    let res = app.put(&routes::experience(id), &body).await;
    assert_eq!(res.status, 200, "update failed: {}", res.text);

    let fetched = app.get(&routes::experience(id)).await;
    assert_eq!(fetched.body["title"], "Staff Engineer");
    assert!(fetched.body["responsibilities"].as_array().unwrap().is_empty());
    let skills = fetched.body["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["skill_name"], "Go");
}

#[tokio::test]
async fn list_returns_children_for_every_experience() {
    let app = TestApp::spawn().await;
    app.post(routes::EXPERIENCES, &experience_body()).await;
    let mut second = experience_body();
    second["company"] = json!("Globex");
    second["skills"] = json!([]);
    app.post(routes::EXPERIENCES, &second).await;

    let res = app.get(routes::EXPERIENCES).await;
    assert_eq!(res.status, 200);
    let items = res.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let skill_counts: Vec<usize> = items
        .iter()
        .map(|e| e["skills"].as_array().unwrap().len())
        .collect();
    assert!(skill_counts.contains(&2));
    assert!(skill_counts.contains(&0));
}

#[tokio::test]
async fn delete_removes_experience_and_missing_id_is_404() {
    let app = TestApp::spawn().await;
    let id = app.post(routes::EXPERIENCES, &experience_body()).await.id();

    let res = app.delete(&routes::experience(id)).await;
    assert_eq!(res.status, 204);
    assert!(experience_skill::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(
        experience_responsibility::Entity::find()
            .all(&app.db)
            .await
            .unwrap()
            .is_empty()
    );

    let res = app.get(&routes::experience(id)).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");

    let res = app.delete(&routes::experience(id)).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn invalid_payload_is_rejected() {
    let app = TestApp::spawn().await;
    let mut body = experience_body();
    body["title"] = json!("   ");

    let res = app.post(routes::EXPERIENCES, &body).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");

    let res = app.get("/api/v1/experiences/not-a-uuid").await;
    assert_eq!(res.status, 400);

    let res = app.put(&routes::experience(Uuid::new_v4()), &experience_body()).await;
    assert_eq!(res.status, 404);
}
