pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use response::MessageBody;
