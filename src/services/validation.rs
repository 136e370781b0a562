//! Request parameter validation.
//!
//! Format checks (required fields, allow-lists, numeric parameters) are plain
//! functions returning the parsed value, so a handler runs them in the order it
//! needs and the first failure short-circuits with `?`. Existence checks need a
//! database round trip each; [`Validator`] issues them concurrently and reports
//! the first failing check in registration order, which keeps the outcome
//! deterministic when several fail at once.

use crate::{
    error::{AppError, AppResult},
    models::{topic, Article, Comment, Topic, User},
};
use futures_util::future::join_all;
use sea_orm::{
    sea_query::{Expr, Func},
    DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
};
use serde_json::Value;

/// LIKE pattern that matches every topic.
pub const WILDCARD: &str = "%";

/// Columns an article list may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Author,
    Title,
    ArticleId,
    Topic,
    CreatedAt,
    Votes,
    ArticleImgUrl,
    CommentCount,
}

impl SortColumn {
    pub const ALLOWED: [&'static str; 8] = [
        "author",
        "title",
        "article_id",
        "topic",
        "created_at",
        "votes",
        "article_img_url",
        "comment_count",
    ];

    /// Parse `sort_by`; absent means `created_at`, and `date` is an alias for it.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let Some(raw) = raw else {
            return Ok(SortColumn::CreatedAt);
        };
        match raw.to_ascii_lowercase().as_str() {
            "author" => Ok(SortColumn::Author),
            "title" => Ok(SortColumn::Title),
            "article_id" => Ok(SortColumn::ArticleId),
            "topic" => Ok(SortColumn::Topic),
            "created_at" | "date" => Ok(SortColumn::CreatedAt),
            "votes" => Ok(SortColumn::Votes),
            "article_img_url" => Ok(SortColumn::ArticleImgUrl),
            "comment_count" => Ok(SortColumn::CommentCount),
            _ => Err(AppError::invalid("sort_by")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Author => "author",
            SortColumn::Title => "title",
            SortColumn::ArticleId => "article_id",
            SortColumn::Topic => "topic",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::ArticleImgUrl => "article_img_url",
            SortColumn::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `order`, case-insensitively; absent means descending.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(|r| r.to_ascii_uppercase()).as_deref() {
            None | Some("DESC") => Ok(SortOrder::Desc),
            Some("ASC") => Ok(SortOrder::Asc),
            Some(_) => Err(AppError::invalid("order")),
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Lower-cased LIKE pattern for the article topic filter.
pub fn topic_pattern(raw: Option<&str>) -> String {
    match raw {
        None => WILDCARD.to_string(),
        Some(t) => t.to_lowercase(),
    }
}

/// Strictly positive integer parameter (`limit`, `p`).
pub fn positive(name: &str, raw: Option<&str>, default: u64) -> AppResult<u64> {
    match raw {
        None => Ok(default),
        Some(s) => match parse_digits(s) {
            Some(n) if n > 0 => Ok(n),
            _ => Err(AppError::invalid(name)),
        },
    }
}

/// Non-negative integer parameter (`offset`).
pub fn non_negative(name: &str, raw: Option<&str>, default: u64) -> AppResult<u64> {
    match raw {
        None => Ok(default),
        Some(s) => parse_digits(s).ok_or_else(|| AppError::invalid(name)),
    }
}

/// Numeric path id. Zero passes here and fails the existence check instead.
pub fn path_id(name: &str, raw: &str) -> AppResult<i32> {
    parse_digits(raw)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| AppError::invalid(name))
}

/// Required text field from a JSON body: missing, blank or non-string values
/// are rejected.
pub fn required(name: &str, value: Option<Value>) -> AppResult<String> {
    match value {
        Some(Value::String(v)) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::invalid(name)),
    }
}

/// Optional text field: absent or `null` is `None`, any non-string is rejected.
pub fn optional(name: &str, value: Option<Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v)),
        Some(_) => Err(AppError::invalid(name)),
    }
}

/// Vote delta from a JSON body. Missing, zero, fractional or non-numeric
/// values are rejected.
pub fn inc_votes(value: Option<&Value>) -> AppResult<i32> {
    let delta = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    delta
        .filter(|d| *d != 0)
        .and_then(|d| i32::try_from(d).ok())
        .ok_or_else(|| AppError::invalid("inc_votes"))
}

/// Postgres has no unsigned integers; anything above `BIGINT` max cannot be bound.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u64>().ok().filter(|n| i64::try_from(*n).is_ok())
}

/// A row that must exist before a request may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Article(i32),
    Comment(i32),
    Username(String),
    /// Matched case-insensitively against `topics.slug`.
    Topic(String),
}

impl Target {
    /// Parameter name reported in the `<name> not found` message.
    pub fn name(&self) -> &'static str {
        match self {
            Target::Article(_) => "article_id",
            Target::Comment(_) => "comment_id",
            Target::Username(_) => "username",
            Target::Topic(_) => "topic",
        }
    }

    async fn exists(&self, db: &DatabaseConnection) -> AppResult<bool> {
        let count = match self {
            Target::Article(id) => Article::find_by_id(*id).count(db).await?,
            Target::Comment(id) => Comment::find_by_id(*id).count(db).await?,
            Target::Username(name) => User::find_by_id(name.clone()).count(db).await?,
            Target::Topic(slug) => {
                Topic::find()
                    .filter(
                        Expr::expr(Func::lower(Expr::col(topic::Column::Slug)))
                            .eq(slug.to_lowercase()),
                    )
                    .count(db)
                    .await?
            }
        };
        Ok(count > 0)
    }
}

/// Concurrent existence checks against the database.
pub struct Validator<'a> {
    db: &'a DatabaseConnection,
    targets: Vec<Target>,
}

impl<'a> Validator<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            targets: Vec::new(),
        }
    }

    pub fn exists(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Topic existence, skipped for the wildcard filter.
    pub fn topic(self, pattern: &str) -> Self {
        if pattern == WILDCARD {
            self
        } else {
            self.exists(Target::Topic(pattern.to_string()))
        }
    }

    pub async fn run(self) -> AppResult<()> {
        let db = self.db;
        let results = join_all(self.targets.iter().map(|target| async move {
            if target.exists(db).await? {
                Ok(())
            } else {
                Err(AppError::not_found(target.name()))
            }
        }))
        .await;

        results.into_iter().collect()
    }
}
