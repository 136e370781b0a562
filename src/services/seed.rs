use crate::models::{article, comment, topic, user, Article, Comment, Topic, User};
use crate::services::article::DEFAULT_ARTICLE_IMG_URL;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use std::path::Path;

/// A complete data set for an empty database. Timestamps are epoch
/// milliseconds; missing ones default to the time of seeding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub topics: Vec<SeedTopic>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub articles: Vec<SeedArticle>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTopic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub votes: Option<i32>,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

/// Comments point at articles by their position-derived id (1-based).
#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub votes: Option<i32>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SeedData {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }
}

/// Wipe all four tables, restart their id sequences and insert `data`.
pub async fn run(db: &DatabaseConnection, data: &SeedData) -> anyhow::Result<()> {
    let now = Utc::now();
    let txn = db.begin().await?;

    txn.execute_unprepared(
        "TRUNCATE TABLE comments, articles, users, topics RESTART IDENTITY CASCADE",
    )
    .await?;

    if !data.topics.is_empty() {
        Topic::insert_many(data.topics.iter().map(|t| topic::ActiveModel {
            slug: Set(t.slug.clone()),
            description: Set(t.description.clone()),
        }))
        .exec_without_returning(&txn)
        .await?;
    }

    if !data.users.is_empty() {
        User::insert_many(data.users.iter().map(|u| user::ActiveModel {
            username: Set(u.username.clone()),
            name: Set(u.name.clone()),
            avatar_url: Set(u.avatar_url.clone()),
        }))
        .exec_without_returning(&txn)
        .await?;
    }

    if !data.articles.is_empty() {
        Article::insert_many(data.articles.iter().map(|a| article::ActiveModel {
            title: Set(a.title.clone()),
            topic: Set(a.topic.clone()),
            author: Set(a.author.clone()),
            body: Set(a.body.clone()),
            created_at: Set(a.created_at.unwrap_or(now).naive_utc()),
            votes: Set(a.votes.unwrap_or(0)),
            article_img_url: Set(a
                .article_img_url
                .clone()
                .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_string())),
            ..Default::default()
        }))
        .exec_without_returning(&txn)
        .await?;
    }

    if !data.comments.is_empty() {
        Comment::insert_many(data.comments.iter().map(|c| comment::ActiveModel {
            article_id: Set(c.article_id),
            author: Set(c.author.clone()),
            body: Set(c.body.clone()),
            votes: Set(c.votes.unwrap_or(0)),
            created_at: Set(c.created_at.unwrap_or(now).naive_utc()),
            ..Default::default()
        }))
        .exec_without_returning(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "database seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default() {
        let data: SeedData = serde_json::from_value(json!({
            "articles": [{
                "title": "t", "topic": "cats", "author": "a", "body": "b"
            }],
            "comments": [{
                "article_id": 1, "author": "a", "body": "b",
                "created_at": 1586179020000i64
            }]
        }))
        .unwrap();

        assert!(data.topics.is_empty());
        assert_eq!(data.articles[0].votes, None);
        assert!(data.articles[0].created_at.is_none());
        assert_eq!(
            data.comments[0].created_at.unwrap().timestamp_millis(),
            1586179020000
        );
    }
}
