use crate::error::AppResult;
use crate::models::UserModel;
use crate::response::MessageBody;
use crate::services::user::UserService;
use axum::{extract::Path, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: UserModel,
}

/// Serves up an array of all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = UsersResponse,
            example = json!({"users": [{
                "username": "butter_bridge",
                "name": "jonny",
                "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
            }]})),
    ),
    tag = "users"
)]
pub async fn list_users(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<Json<UsersResponse>> {
    let users = UserService::new(db).list().await?;
    Ok(Json(UsersResponse { users }))
}

/// Serves up a single user by username
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "The user", body = UserResponse,
            example = json!({"user": {
                "username": "butter_bridge",
                "name": "jonny",
                "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
            }})),
        (status = 404, description = "Unknown username", body = MessageBody),
    ),
    tag = "users"
)]
pub async fn get_user(
    Extension(db): Extension<DatabaseConnection>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::new(db).get_by_username(&username).await?;
    Ok(Json(UserResponse { user }))
}
