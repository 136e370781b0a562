use crate::error::AppResult;
use crate::models::TopicModel;
use crate::services::topic::TopicService;
use axum::{Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<TopicModel>,
}

/// Serves up an array of all topics
#[utoipa::path(
    get,
    path = "/api/topics",
    responses(
        (status = 200, description = "All topics", body = TopicsResponse,
            example = json!({"topics": [{"slug": "football", "description": "Footie!"}]})),
    ),
    tag = "topics"
)]
pub async fn list_topics(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<Json<TopicsResponse>> {
    let topics = TopicService::new(db).list().await?;
    Ok(Json(TopicsResponse { topics }))
}
