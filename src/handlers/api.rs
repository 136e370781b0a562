use crate::docs::ApiDoc;
use crate::services::catalog::endpoint_catalog;
use axum::{response::IntoResponse, Extension, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointsResponse {
    #[schema(value_type = Object)]
    pub endpoints: Map<String, Value>,
}

/// Serves up a json representation of all the available endpoints of the api
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Endpoint catalog", body = EndpointsResponse),
    ),
    tag = "api"
)]
pub async fn get_endpoints() -> Json<EndpointsResponse> {
    Json(EndpointsResponse {
        endpoints: endpoint_catalog(&ApiDoc::openapi()),
    })
}

/// Liveness and database connectivity probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value,
            example = json!({"status": "ok", "service": "News API", "version": "0.1.0", "database": true}))
    ),
    tag = "api"
)]
pub async fn health_check(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    let db_ok = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();

    let status = if db_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "News API",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}
