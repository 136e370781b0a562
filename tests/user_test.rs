mod common;

use serde_json::Value;

#[tokio::test]
async fn lists_all_users() {
    let app = common::spawn_app().await;

    let resp = app.get("/api/users").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let users = body["users"].as_array().unwrap();

    assert_eq!(users.len(), 4);
    for user in users {
        assert!(user["username"].is_string());
        assert!(user["name"].is_string());
        assert!(user["avatar_url"].is_string());
    }
}

#[tokio::test]
async fn gets_user_by_username() {
    let app = common::spawn_app().await;

    let resp = app.get("/api/users/butter_bridge").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["username"], "butter_bridge");
    assert_eq!(body["user"]["name"], "jonny");
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let app = common::spawn_app().await;

    let resp = app.get("/api/users/not_a_user").await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "username not found");
}
