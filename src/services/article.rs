use crate::{
    error::{AppError, AppResult},
    models::{article, comment, Article, ArticleDetail, ArticleModel, ArticleSummary},
    response::Page,
    services::validation::{SortColumn, SortOrder, Target, Validator},
};
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Statement,
};
use validator::Validate;

pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

const COMMENT_COUNT: &str = "comment_count";

/// Validated parameters of an article listing.
#[derive(Debug, Clone)]
pub struct ArticleListParams {
    /// Lower-cased LIKE pattern, `%` for every topic.
    pub topic: String,
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub page: Page,
}

#[derive(Debug, Clone, Validate)]
pub struct NewArticle {
    pub author: String,
    #[validate(length(max = 200))]
    pub title: String,
    pub body: String,
    pub topic: String,
    #[validate(url)]
    pub article_img_url: Option<String>,
}

pub struct ArticleService {
    db: DatabaseConnection,
}

impl ArticleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One page of articles plus the number of articles matching the filter.
    pub async fn list(&self, params: &ArticleListParams) -> AppResult<(Vec<ArticleSummary>, u64)> {
        Validator::new(&self.db).topic(&params.topic).run().await?;

        tracing::debug!(
            topic = %params.topic,
            sort_by = params.sort_by.as_str(),
            order = ?params.order,
            limit = params.page.limit,
            offset = params.page.offset,
            "listing articles"
        );

        let articles = list_query(params)
            .into_model::<ArticleSummary>()
            .all(&self.db)
            .await?;

        let total = Article::find()
            .filter(topic_matches(&params.topic))
            .count(&self.db)
            .await?;

        Ok((articles, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ArticleDetail> {
        detail_query()
            .filter(Expr::col((article::Entity, article::Column::ArticleId)).eq(id))
            .into_model::<ArticleDetail>()
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("article_id"))
    }

    pub async fn create(&self, new: NewArticle) -> AppResult<ArticleDetail> {
        let topic = new.topic.to_lowercase();

        Validator::new(&self.db)
            .exists(Target::Username(new.author.clone()))
            .exists(Target::Topic(topic.clone()))
            .run()
            .await?;

        let now = chrono::Utc::now().naive_utc();

        let new_article = article::ActiveModel {
            title: sea_orm::ActiveValue::Set(new.title),
            topic: sea_orm::ActiveValue::Set(topic),
            author: sea_orm::ActiveValue::Set(new.author),
            body: sea_orm::ActiveValue::Set(new.body),
            created_at: sea_orm::ActiveValue::Set(now),
            votes: sea_orm::ActiveValue::Set(0),
            article_img_url: sea_orm::ActiveValue::Set(
                new.article_img_url
                    .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_string()),
            ),
            ..Default::default()
        };

        let article = new_article.insert(&self.db).await?;
        tracing::info!(article_id = article.article_id, "article created");

        self.get_by_id(article.article_id).await
    }

    /// Atomically add `inc_votes` to the article's votes.
    pub async fn update_votes(&self, id: i32, inc_votes: i32) -> AppResult<ArticleModel> {
        Validator::new(&self.db)
            .exists(Target::Article(id))
            .run()
            .await?;

        let updated = ArticleModel::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE articles SET votes = votes + $2 WHERE article_id = $1 RETURNING *",
            [id.into(), inc_votes.into()],
        ))
        .one(&self.db)
        .await
        .map_err(|e| AppError::out_of_range(e, "inc_votes"))?
        // Deleted between the existence check and the update.
        .ok_or_else(|| AppError::not_found("article_id"))?;

        tracing::info!(article_id = id, inc_votes, votes = updated.votes, "article votes updated");
        Ok(updated)
    }
}

/// `lower(articles.topic) LIKE $n`
fn topic_matches(pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((article::Entity, article::Column::Topic))))
        .like(pattern)
}

/// Article columns plus `COUNT(comments.comment_id) AS comment_count` over a
/// left join, so articles without comments count 0.
fn with_comment_count(select: Select<Article>) -> Select<Article> {
    select
        .column_as(
            Expr::col((comment::Entity, comment::Column::CommentId)).count(),
            COMMENT_COUNT,
        )
        .left_join(comment::Entity)
        .group_by(article::Column::ArticleId)
}

fn detail_query() -> Select<Article> {
    with_comment_count(Article::find())
}

fn sort_expr(column: SortColumn) -> SimpleExpr {
    let column = match column {
        SortColumn::Author => article::Column::Author,
        SortColumn::Title => article::Column::Title,
        SortColumn::ArticleId => article::Column::ArticleId,
        SortColumn::Topic => article::Column::Topic,
        SortColumn::CreatedAt => article::Column::CreatedAt,
        SortColumn::Votes => article::Column::Votes,
        SortColumn::ArticleImgUrl => article::Column::ArticleImgUrl,
        SortColumn::CommentCount => return Expr::col(Alias::new(COMMENT_COUNT)).into(),
    };
    Expr::col((article::Entity, column)).into()
}

pub(crate) fn list_query(params: &ArticleListParams) -> Select<Article> {
    let order: Order = params.order.into();

    let select = Article::find().select_only().columns([
        article::Column::Author,
        article::Column::Title,
        article::Column::ArticleId,
        article::Column::Topic,
        article::Column::CreatedAt,
        article::Column::Votes,
        article::Column::ArticleImgUrl,
    ]);

    with_comment_count(select)
        .filter(topic_matches(&params.topic))
        .order_by(sort_expr(params.sort_by), order.clone())
        .order_by(article::Column::ArticleId, order)
        .limit(params.page.limit)
        .offset(params.page.offset)
}
