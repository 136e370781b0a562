use crate::error::{AppError, AppResult};
use crate::handlers::validation_error;
use crate::models::{ArticleDetail, ArticleModel, ArticleSummary};
use crate::response::{MessageBody, Page, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::services::article::{ArticleListParams, ArticleService, NewArticle};
use crate::services::validation::{self, SortColumn, SortOrder};
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
use validator::Validate;

/// Fields arrive untyped so a wrong JSON type is reported by field name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    /// Username of an existing user
    #[schema(value_type = String)]
    pub author: Option<Value>,
    /// Article title (up to 200 characters)
    #[schema(value_type = String)]
    pub title: Option<Value>,
    #[schema(value_type = String)]
    pub body: Option<Value>,
    /// Slug of an existing topic, matched case-insensitively
    #[schema(value_type = String)]
    pub topic: Option<Value>,
    /// Defaults to a stock image when omitted
    #[schema(value_type = Option<String>)]
    pub article_img_url: Option<Value>,
}

/// Vote delta. A number or a numeric string; zero is rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VotesRequest {
    #[schema(value_type = i32)]
    pub inc_votes: Option<Value>,
}

/// Query values stay strings so that malformed ones get a named rejection.
#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummary>,
    pub total_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub article: ArticleDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedArticleResponse {
    pub article: ArticleModel,
}

/// Serves up an array of all articles
#[utoipa::path(
    get,
    path = "/api/articles",
    params(
        ("topic" = Option<String>, Query, description = "Topic slug filter, case-insensitive"),
        ("sort_by" = Option<String>, Query, description = "Column to sort by, default created_at"),
        ("order" = Option<String>, Query, description = "ASC or DESC, default DESC"),
        ("limit" = Option<String>, Query, description = "Page size, default 10"),
        ("p" = Option<String>, Query, description = "1-indexed page number, default 1"),
    ),
    responses(
        (status = 200, description = "One page of articles", body = ArticlesResponse,
            example = json!({
                "articles": [{
                    "author": "weegembump",
                    "title": "Seafood substitutions are increasing",
                    "article_id": 33,
                    "topic": "cooking",
                    "created_at": "2018-05-30T15:59:13",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700",
                    "comment_count": 6
                }],
                "total_count": 1
            })),
        (status = 400, description = "Invalid query parameter", body = MessageBody),
        (status = 404, description = "Unknown topic", body = MessageBody),
    ),
    tag = "articles"
)]
pub async fn list_articles(
    Extension(db): Extension<DatabaseConnection>,
    Query(query): Query<ArticleListQuery>,
) -> AppResult<Json<ArticlesResponse>> {
    let sort_by = SortColumn::parse(query.sort_by.as_deref())?;
    let order = SortOrder::parse(query.order.as_deref())?;
    let limit = validation::positive("limit", query.limit.as_deref(), DEFAULT_LIMIT)?;
    let page = validation::positive("p", query.p.as_deref(), DEFAULT_PAGE)?;

    let params = ArticleListParams {
        topic: validation::topic_pattern(query.topic.as_deref()),
        sort_by,
        order,
        page: Page::numbered(limit, page).ok_or_else(|| AppError::invalid("p"))?,
    };

    let (articles, total_count) = ArticleService::new(db).list(&params).await?;
    Ok(Json(ArticlesResponse {
        articles,
        total_count,
    }))
}

/// Serves up a single article with its comment count
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}",
    params(("article_id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "The article", body = ArticleResponse,
            example = json!({
                "article": {
                    "author": "butter_bridge",
                    "title": "Living in the shadow of a great man",
                    "article_id": 1,
                    "body": "I find this existence challenging",
                    "topic": "mitch",
                    "created_at": "2020-07-09T20:11:00",
                    "votes": 100,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                    "comment_count": 11
                }
            })),
        (status = 400, description = "Non-numeric id", body = MessageBody),
        (status = 404, description = "Unknown article", body = MessageBody),
    ),
    tag = "articles"
)]
pub async fn get_article(
    Extension(db): Extension<DatabaseConnection>,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleResponse>> {
    let id = validation::path_id("article_id", &article_id)?;
    let article = ArticleService::new(db).get_by_id(id).await?;
    Ok(Json(ArticleResponse { article }))
}

/// Adds an article and serves it back
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body(content = CreateArticleRequest,
        example = json!({
            "author": "butter_bridge",
            "title": "A new article",
            "body": "Some text",
            "topic": "cats",
            "article_img_url": "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700"
        })),
    responses(
        (status = 201, description = "Article created", body = ArticleResponse,
            example = json!({
                "article": {
                    "author": "butter_bridge",
                    "title": "A new article",
                    "article_id": 14,
                    "body": "Some text",
                    "topic": "cats",
                    "created_at": "2024-01-01T12:00:00",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700",
                    "comment_count": 0
                }
            })),
        (status = 400, description = "Missing or invalid field", body = MessageBody),
        (status = 404, description = "Unknown author or topic", body = MessageBody),
    ),
    tag = "articles"
)]
pub async fn create_article(
    Extension(db): Extension<DatabaseConnection>,
    JsonBody(payload): JsonBody<CreateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let new = NewArticle {
        author: validation::required("author", payload.author)?,
        title: validation::required("title", payload.title)?,
        body: validation::required("body", payload.body)?,
        topic: validation::required("topic", payload.topic)?,
        article_img_url: validation::optional("article_img_url", payload.article_img_url)?,
    };
    new.validate().map_err(validation_error)?;

    let article = ArticleService::new(db).create(new).await?;
    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

/// Changes an article's votes by `inc_votes`
#[utoipa::path(
    patch,
    path = "/api/articles/{article_id}",
    params(("article_id" = i32, Path, description = "Article ID")),
    request_body(content = VotesRequest, example = json!({"inc_votes": 1})),
    responses(
        (status = 200, description = "Updated article", body = UpdatedArticleResponse,
            example = json!({
                "article": {
                    "article_id": 1,
                    "title": "Living in the shadow of a great man",
                    "topic": "mitch",
                    "author": "butter_bridge",
                    "body": "I find this existence challenging",
                    "created_at": "2020-07-09T20:11:00",
                    "votes": 101,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700"
                }
            })),
        (status = 400, description = "Invalid id or inc_votes", body = MessageBody),
        (status = 404, description = "Unknown article", body = MessageBody),
    ),
    tag = "articles"
)]
pub async fn update_article_votes(
    Extension(db): Extension<DatabaseConnection>,
    Path(article_id): Path<String>,
    JsonBody(payload): JsonBody<VotesRequest>,
) -> AppResult<Json<UpdatedArticleResponse>> {
    let id = validation::path_id("article_id", &article_id)?;
    let inc_votes = validation::inc_votes(payload.inc_votes.as_ref())?;

    let article = ArticleService::new(db).update_votes(id, inc_votes).await?;
    Ok(Json(UpdatedArticleResponse { article }))
}
