use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<UserModel>> {
        let users = User::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<UserModel> {
        User::find_by_id(username.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("username"))
    }
}
