mod common;

use serde_json::Value;

#[tokio::test]
async fn endpoint_catalog_describes_every_route() {
    let app = common::spawn_app().await;

    let resp = app.get("/api").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let endpoints = body["endpoints"].as_object().unwrap();

    assert!(endpoints.contains_key("GET /api"));
    for (key, entry) in endpoints {
        if key == "GET /api" {
            continue;
        }
        assert!(entry["description"].is_string(), "{key}");
        assert!(entry["allowedQueries"].is_array(), "{key}");
        assert!(entry["exampleRequest"].is_object(), "{key}");
        assert!(entry["exampleResponse"].is_object(), "{key}");
    }

    let comments = &endpoints["GET /api/articles/:article_id/comments"];
    assert_eq!(
        comments["allowedQueries"],
        serde_json::json!(["limit", "p", "offset"])
    );
}

#[tokio::test]
async fn unknown_path_is_endpoint_not_found() {
    let app = common::spawn_app().await;

    let resp = app.get("/api/not-a-route").await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "endpoint not found");
}

#[tokio::test]
async fn unsupported_method_is_endpoint_not_found() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .put(app.url("/api/articles/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "endpoint not found");
}

#[tokio::test]
async fn health_reports_database() {
    let app = common::spawn_app().await;

    let resp = app.get("/health").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = common::spawn_app().await;

    let resp = app.get("/api-docs/openapi.json").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["paths"]["/api/articles/{article_id}"].is_object());
}
