mod common;

use serde_json::{json, Value};

async fn comments(app: &common::TestApp, path: &str) -> (u16, Value) {
    let resp = app.get(path).await;
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn lists_comments_newest_first() {
    let app = common::spawn_app().await;

    let (status, body) = comments(&app, "/api/articles/1/comments").await;
    assert_eq!(status, 200);
    assert_eq!(body["total_count"], 11);

    let list = body["comments"].as_array().unwrap();
    assert_eq!(list.len(), 10);
    assert_eq!(list[0]["comment_id"], 5);
    for comment in list {
        assert_eq!(comment["article_id"], 1);
        assert!(comment["author"].is_string());
        assert!(comment["body"].is_string());
        assert!(comment["votes"].is_number());
    }
}

#[tokio::test]
async fn paginates_comments() {
    let app = common::spawn_app().await;

    let (_, body) = comments(&app, "/api/articles/1/comments?limit=5&p=3").await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_count"], 11);

    let (_, body) = comments(&app, "/api/articles/1/comments?offset=10").await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    // An explicit offset wins over the page number.
    let (_, body) = comments(&app, "/api/articles/1/comments?offset=0&p=3").await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 10);
    assert_eq!(body["comments"][0]["comment_id"], 5);

    let (status, body) = comments(&app, "/api/articles/1/comments?offset=x").await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "invalid offset");

    let (status, body) =
        comments(&app, "/api/articles/1/comments?offset=18446744073709551615").await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "invalid offset");

    let (status, body) =
        comments(&app, "/api/articles/1/comments?limit=9223372036854775808").await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "invalid limit");

    let (status, body) =
        comments(&app, "/api/articles/1/comments?limit=2&p=9223372036854775807").await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "invalid p");
}

#[tokio::test]
async fn article_without_comments_is_empty() {
    let app = common::spawn_app().await;

    let (status, body) = comments(&app, "/api/articles/2/comments").await;
    assert_eq!(status, 200);
    assert_eq!(body["comments"], json!([]));
    assert_eq!(body["total_count"], 0);
}

#[tokio::test]
async fn list_comments_rejects_bad_articles() {
    let app = common::spawn_app().await;

    let (status, body) = comments(&app, "/api/articles/999/comments").await;
    assert_eq!(status, 404);
    assert_eq!(body["msg"], "article_id not found");

    let (status, body) = comments(&app, "/api/articles/banana/comments").await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "invalid article_id");
}

#[tokio::test]
async fn creates_comment() {
    let app = common::spawn_app().await;

    let resp = app
        .post(
            "/api/articles/2/comments",
            json!({"username": "lurker", "body": "First!"}),
        )
        .await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let comment = &body["comment"];
    assert_eq!(comment["comment_id"], 19);
    assert_eq!(comment["article_id"], 2);
    assert_eq!(comment["author"], "lurker");
    assert_eq!(comment["body"], "First!");
    assert_eq!(comment["votes"], 0);

    let resp = app.get("/api/articles/2").await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["article"]["comment_count"], 1);
}

#[tokio::test]
async fn each_post_adds_one_comment() {
    let app = common::spawn_app().await;
    let payload = json!({"username": "lurker", "body": "Echo"});

    let mut ids = Vec::new();
    for expected_total in [12, 13] {
        let resp = app.post("/api/articles/1/comments", payload.clone()).await;
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        ids.push(body["comment"]["comment_id"].as_i64().unwrap());

        let (_, body) = comments(&app, "/api/articles/1/comments").await;
        assert_eq!(body["total_count"], expected_total);
    }
    assert_eq!(ids, vec![19, 20]);
}

#[tokio::test]
async fn create_comment_validates_body() {
    let app = common::spawn_app().await;

    let resp = app
        .post("/api/articles/1/comments", json!({"username": "lurker"}))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid comment");

    let resp = app
        .post("/api/articles/1/comments", json!({"body": "hi"}))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid username");

    let resp = app
        .post("/api/articles/1/comments", json!({"username": 5, "body": "hi"}))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid username");

    let resp = app
        .post(
            "/api/articles/1/comments",
            json!({"username": "lurker", "body": {"text": "hi"}}),
        )
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid comment");

    let (_, body) = comments(&app, "/api/articles/1/comments").await;
    assert_eq!(body["total_count"], 11);
}

#[tokio::test]
async fn create_comment_checks_references() {
    let app = common::spawn_app().await;

    let resp = app
        .post(
            "/api/articles/1/comments",
            json!({"username": "not_a_username", "body": "x"}),
        )
        .await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "username not found");

    let resp = app
        .post(
            "/api/articles/999/comments",
            json!({"username": "not_a_username", "body": "x"}),
        )
        .await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "article_id not found");

    let (_, body) = comments(&app, "/api/articles/1/comments").await;
    assert_eq!(body["total_count"], 11);
}

#[tokio::test]
async fn comment_votes_round_trip() {
    let app = common::spawn_app().await;

    let resp = app.patch("/api/comments/1", json!({"inc_votes": 1})).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["comment"]["votes"], 17);

    let resp = app.patch("/api/comments/1", json!({"inc_votes": -1})).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["comment"]["votes"], 16);
}

#[tokio::test]
async fn comment_votes_reject_bad_input() {
    let app = common::spawn_app().await;

    let resp = app.patch("/api/comments/1", json!({"inc_votes": 0})).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid inc_votes");

    let resp = app
        .patch("/api/comments/1", json!({"inc_votes": 2147483647}))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid inc_votes");

    // Unchanged: one more vote lands on the seeded 16.
    let resp = app.patch("/api/comments/1", json!({"inc_votes": 1})).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["comment"]["votes"], 17);

    let resp = app.patch("/api/comments/999", json!({"inc_votes": 1})).await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "comment_id not found");
}

#[tokio::test]
async fn deletes_comment() {
    let app = common::spawn_app().await;

    let resp = app.delete("/api/comments/5").await;
    assert_eq!(resp.status(), 204);
    assert!(resp.bytes().await.unwrap().is_empty());

    let (_, body) = comments(&app, "/api/articles/1/comments").await;
    assert_eq!(body["total_count"], 10);

    let resp = app.delete("/api/comments/5").await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "comment_id not found");

    let resp = app.delete("/api/comments/banana").await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "invalid comment_id");
}
