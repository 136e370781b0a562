use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

use crate::response::MessageBody;

/// SQLSTATE codes that get a dedicated response.
const PG_UNDEFINED_TABLE: &str = "42P01";
const PG_INVALID_TEXT_REPRESENTATION: &str = "22P02";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal server error: {0}")]
    Unhandled(#[from] anyhow::Error),
}

impl AppError {
    /// `invalid <name>` rejection for a malformed or missing parameter.
    pub fn invalid(name: &str) -> Self {
        AppError::InvalidInput(format!("invalid {}", name))
    }

    /// `<name> not found` rejection for a failed existence check.
    pub fn not_found(name: &str) -> Self {
        AppError::NotFound(format!("{} not found", name))
    }

    /// Report an arithmetic overflow in a write as `invalid <name>`, any other
    /// database error unchanged.
    pub fn out_of_range(err: DbErr, name: &str) -> Self {
        if sql_state(&err).as_deref() == Some(PG_NUMERIC_VALUE_OUT_OF_RANGE) {
            AppError::invalid(name)
        } else {
            AppError::Database(err)
        }
    }

    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Database(e) => match sql_state(e).as_deref() {
                Some(PG_UNDEFINED_TABLE) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "table not found".to_string(),
                ),
                Some(PG_INVALID_TEXT_REPRESENTATION) => {
                    (StatusCode::BAD_REQUEST, "invalid input".to_string())
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => (
                    StatusCode::BAD_REQUEST,
                    "foreign key violation".to_string(),
                ),
                Some(code) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("unhandled database error: {}", code),
                ),
                None => unhandled(),
            },
            AppError::Unhandled(_) => unhandled(),
        }
    }
}

fn unhandled() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "unhandled internal server error".to_string(),
    )
}

/// Extract the PostgreSQL SQLSTATE code from a driver error, if any.
fn sql_state(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Query(e) | DbErr::Exec(e) | DbErr::Conn(e) => e,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err)) => {
            db_err.code().map(|c| c.into_owned())
        }
        _ => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("{}: {:?}", msg, self);
        }

        (status, Json(MessageBody { msg })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
