mod common;

use serde_json::Value;

#[tokio::test]
async fn lists_all_topics() {
    let app = common::spawn_app().await;

    let resp = app.get("/api/topics").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let topics = body["topics"].as_array().unwrap();

    assert_eq!(topics.len(), 3);
    for topic in topics {
        assert!(topic["slug"].is_string());
        assert!(topic["description"].is_string());
    }
    assert!(topics.iter().any(|t| t["slug"] == "cats" && t["description"] == "Not dogs"));
}
