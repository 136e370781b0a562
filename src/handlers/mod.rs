pub mod api;
pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

use crate::error::AppError;
use validator::ValidationErrors;

/// `invalid <field>` for the alphabetically first failing field, so the
/// message is stable when several fields fail.
pub(crate) fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
    fields.sort();
    match fields.first() {
        Some(field) => AppError::invalid(field),
        None => AppError::InvalidInput("invalid request body".to_string()),
    }
}

/// Fallback for unmatched paths and methods.
pub async fn endpoint_not_found() -> AppError {
    AppError::not_found("endpoint")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn reports_first_failing_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("length"));
        errors.add("article_img_url", ValidationError::new("url"));
        assert_eq!(validation_error(errors).to_string(), "invalid article_img_url");
    }
}
