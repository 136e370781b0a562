use crate::error::{AppError, AppResult};
use crate::handlers::article::VotesRequest;
use crate::models::CommentModel;
use crate::response::{MessageBody, Page, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::services::comment::CommentService;
use crate::services::validation;
use crate::utils::JsonBody;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    /// Username of an existing user
    #[schema(value_type = String)]
    pub username: Option<Value>,
    /// Comment text
    #[schema(value_type = String)]
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub limit: Option<String>,
    pub p: Option<String>,
    /// Takes precedence over `p` when present.
    pub offset: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<CommentModel>,
    pub total_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub comment: CommentModel,
}

/// Serves up the comments of an article, newest first
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}/comments",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
        ("limit" = Option<String>, Query, description = "Page size, default 10"),
        ("p" = Option<String>, Query, description = "1-indexed page number, default 1"),
        ("offset" = Option<String>, Query, description = "Rows to skip, overrides p"),
    ),
    responses(
        (status = 200, description = "One page of comments", body = CommentsResponse,
            example = json!({
                "comments": [{
                    "comment_id": 5,
                    "article_id": 1,
                    "author": "icellusedkars",
                    "body": "I hate streaming noses",
                    "votes": 0,
                    "created_at": "2020-11-03T21:00:00"
                }],
                "total_count": 11
            })),
        (status = 400, description = "Invalid id or query parameter", body = MessageBody),
        (status = 404, description = "Unknown article", body = MessageBody),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    Extension(db): Extension<DatabaseConnection>,
    Path(article_id): Path<String>,
    Query(query): Query<CommentListQuery>,
) -> AppResult<Json<CommentsResponse>> {
    let id = validation::path_id("article_id", &article_id)?;
    let limit = validation::positive("limit", query.limit.as_deref(), DEFAULT_LIMIT)?;
    let page = validation::positive("p", query.p.as_deref(), DEFAULT_PAGE)?;

    let window = match query.offset.as_deref() {
        Some(raw) => Page::at_offset(limit, validation::non_negative("offset", Some(raw), 0)?),
        None => Page::numbered(limit, page).ok_or_else(|| AppError::invalid("p"))?,
    };

    let (comments, total_count) = CommentService::new(db)
        .list_by_article(id, window)
        .await?;
    Ok(Json(CommentsResponse {
        comments,
        total_count,
    }))
}

/// Adds a comment to an article and serves it back
#[utoipa::path(
    post,
    path = "/api/articles/{article_id}/comments",
    params(("article_id" = i32, Path, description = "Article ID")),
    request_body(content = CreateCommentRequest,
        example = json!({"username": "butter_bridge", "body": "Great read"})),
    responses(
        (status = 201, description = "Comment created", body = CommentResponse,
            example = json!({
                "comment": {
                    "comment_id": 19,
                    "article_id": 1,
                    "author": "butter_bridge",
                    "body": "Great read",
                    "votes": 0,
                    "created_at": "2024-01-01T12:00:00"
                }
            })),
        (status = 400, description = "Invalid id or missing field", body = MessageBody),
        (status = 404, description = "Unknown article or username", body = MessageBody),
    ),
    tag = "comments"
)]
pub async fn create_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(article_id): Path<String>,
    JsonBody(payload): JsonBody<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let id = validation::path_id("article_id", &article_id)?;
    let username = validation::required("username", payload.username)?;
    let body = validation::required("comment", payload.body)?;

    let comment = CommentService::new(db).create(id, username, body).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// Changes a comment's votes by `inc_votes`
#[utoipa::path(
    patch,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment ID")),
    request_body(content = VotesRequest, example = json!({"inc_votes": -1})),
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse,
            example = json!({
                "comment": {
                    "comment_id": 1,
                    "article_id": 9,
                    "author": "butter_bridge",
                    "body": "Oh, I've got compassion running out of my nose, pal!",
                    "votes": 15,
                    "created_at": "2020-04-06T12:17:00"
                }
            })),
        (status = 400, description = "Invalid id or inc_votes", body = MessageBody),
        (status = 404, description = "Unknown comment", body = MessageBody),
    ),
    tag = "comments"
)]
pub async fn update_comment_votes(
    Extension(db): Extension<DatabaseConnection>,
    Path(comment_id): Path<String>,
    JsonBody(payload): JsonBody<VotesRequest>,
) -> AppResult<Json<CommentResponse>> {
    let id = validation::path_id("comment_id", &comment_id)?;
    let inc_votes = validation::inc_votes(payload.inc_votes.as_ref())?;

    let comment = CommentService::new(db).update_votes(id, inc_votes).await?;
    Ok(Json(CommentResponse { comment }))
}

/// Deletes a comment
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Non-numeric id", body = MessageBody),
        (status = 404, description = "Unknown comment", body = MessageBody),
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(comment_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = validation::path_id("comment_id", &comment_id)?;
    CommentService::new(db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
