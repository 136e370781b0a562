use crate::{
    error::AppResult,
    models::{topic, Topic, TopicModel},
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct TopicService {
    db: DatabaseConnection,
}

impl TopicService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<TopicModel>> {
        let topics = Topic::find()
            .order_by_asc(topic::Column::Slug)
            .all(&self.db)
            .await?;
        Ok(topics)
    }
}
