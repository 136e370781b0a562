use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "News API", description = "Articles, comments, topics and users"),
    paths(
        crate::handlers::api::get_endpoints,
        crate::handlers::api::health_check,
        // Topics
        crate::handlers::topic::list_topics,
        // Articles
        crate::handlers::article::list_articles,
        crate::handlers::article::create_article,
        crate::handlers::article::get_article,
        crate::handlers::article::update_article_votes,
        // Comments
        crate::handlers::comment::list_comments,
        crate::handlers::comment::create_comment,
        crate::handlers::comment::update_comment_votes,
        crate::handlers::comment::delete_comment,
        // Users
        crate::handlers::user::list_users,
        crate::handlers::user::get_user,
    ),
    components(
        schemas(
            crate::response::MessageBody,
            crate::handlers::api::EndpointsResponse,
            crate::models::TopicModel,
            crate::models::UserModel,
            crate::models::ArticleModel,
            crate::models::ArticleSummary,
            crate::models::ArticleDetail,
            crate::models::CommentModel,
            crate::handlers::topic::TopicsResponse,
            crate::handlers::article::ArticlesResponse,
            crate::handlers::article::ArticleResponse,
            crate::handlers::article::UpdatedArticleResponse,
            crate::handlers::article::CreateArticleRequest,
            crate::handlers::article::VotesRequest,
            crate::handlers::comment::CommentsResponse,
            crate::handlers::comment::CommentResponse,
            crate::handlers::comment::CreateCommentRequest,
            crate::handlers::user::UsersResponse,
            crate::handlers::user::UserResponse,
        )
    ),
    tags(
        (name = "api", description = "Catalog and health"),
        (name = "topics", description = "Topic operations"),
        (name = "articles", description = "Article operations"),
        (name = "comments", description = "Comment operations"),
        (name = "users", description = "User operations"),
    )
)]
pub struct ApiDoc;
