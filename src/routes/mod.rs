use crate::config::rate_limit::{Quota, RateLimitConfig};
use crate::docs::ApiDoc;
use crate::handlers;
use axum::{routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Every route of the service. Unmatched paths and methods answer
/// 404 `endpoint not found`.
pub fn create_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    Router::new()
        .route("/health", routing::get(handlers::api::health_check))
        .merge(read_routes(&rate_limit_config))
        .merge(write_routes(&rate_limit_config))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::endpoint_not_found)
        .method_not_allowed_fallback(handlers::endpoint_not_found)
}

fn read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/api", routing::get(handlers::api::get_endpoints))
        .route("/api/topics", routing::get(handlers::topic::list_topics))
        .route(
            "/api/articles",
            routing::get(handlers::article::list_articles),
        )
        .route(
            "/api/articles/{article_id}",
            routing::get(handlers::article::get_article),
        )
        .route(
            "/api/articles/{article_id}/comments",
            routing::get(handlers::comment::list_comments),
        )
        .route("/api/users", routing::get(handlers::user::list_users))
        .route(
            "/api/users/{username}",
            routing::get(handlers::user::get_user),
        );

    with_optional_rate_limit(router, config.enabled, config.read)
}

fn write_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/api/articles",
            routing::post(handlers::article::create_article),
        )
        .route(
            "/api/articles/{article_id}",
            routing::patch(handlers::article::update_article_votes),
        )
        .route(
            "/api/articles/{article_id}/comments",
            routing::post(handlers::comment::create_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            routing::patch(handlers::comment::update_comment_votes)
                .delete(handlers::comment::delete_comment),
        );

    with_optional_rate_limit(router, config.enabled, config.write)
}

fn with_optional_rate_limit(router: Router, enabled: bool, quota: Quota) -> Router {
    if !enabled {
        return router;
    }

    match GovernorConfigBuilder::default()
        .per_second(quota.per_second)
        .burst_size(quota.burst)
        .finish()
    {
        Some(governor_conf) => router.layer(GovernorLayer::new(governor_conf)),
        None => {
            tracing::warn!(?quota, "Invalid rate limit quota, serving without rate limiting");
            router
        }
    }
}
