use crate::{
    error::{AppError, AppResult},
    models::{comment, Comment, CommentModel},
    response::Page,
    services::validation::{Target, Validator},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
};

pub struct CommentService {
    db: DatabaseConnection,
}

impl CommentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first, plus the article's total comment count.
    pub async fn list_by_article(
        &self,
        article_id: i32,
        page: Page,
    ) -> AppResult<(Vec<CommentModel>, u64)> {
        Validator::new(&self.db)
            .exists(Target::Article(article_id))
            .run()
            .await?;

        let comments = Comment::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::CommentId)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await?;

        let total = Comment::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .count(&self.db)
            .await?;

        Ok((comments, total))
    }

    pub async fn create(
        &self,
        article_id: i32,
        username: String,
        body: String,
    ) -> AppResult<CommentModel> {
        Validator::new(&self.db)
            .exists(Target::Article(article_id))
            .exists(Target::Username(username.clone()))
            .run()
            .await?;

        let now = chrono::Utc::now().naive_utc();

        let new_comment = comment::ActiveModel {
            article_id: sea_orm::ActiveValue::Set(article_id),
            author: sea_orm::ActiveValue::Set(username),
            body: sea_orm::ActiveValue::Set(body),
            votes: sea_orm::ActiveValue::Set(0),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let comment = new_comment.insert(&self.db).await?;
        tracing::info!(
            comment_id = comment.comment_id,
            article_id,
            "comment created"
        );
        Ok(comment)
    }

    pub async fn update_votes(&self, comment_id: i32, inc_votes: i32) -> AppResult<CommentModel> {
        Validator::new(&self.db)
            .exists(Target::Comment(comment_id))
            .run()
            .await?;

        let updated = CommentModel::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE comments SET votes = votes + $2 WHERE comment_id = $1 RETURNING *",
            [comment_id.into(), inc_votes.into()],
        ))
        .one(&self.db)
        .await
        .map_err(|e| AppError::out_of_range(e, "inc_votes"))?
        .ok_or_else(|| AppError::not_found("comment_id"))?;

        tracing::info!(comment_id, inc_votes, votes = updated.votes, "comment votes updated");
        Ok(updated)
    }

    pub async fn delete(&self, comment_id: i32) -> AppResult<()> {
        Validator::new(&self.db)
            .exists(Target::Comment(comment_id))
            .run()
            .await?;

        let result = Comment::delete_by_id(comment_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("comment_id"));
        }

        tracing::info!(comment_id, "comment deleted");
        Ok(())
    }
}
