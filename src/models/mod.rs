pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

pub use article::{ArticleDetail, ArticleSummary, Entity as Article, Model as ArticleModel};
pub use comment::{Entity as Comment, Model as CommentModel};
pub use topic::{Entity as Topic, Model as TopicModel};
pub use user::{Entity as User, Model as UserModel};
