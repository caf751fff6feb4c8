use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::GeneralResponse;
use crate::services::title_service::TitleError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("A database error occurred: {}", msg),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        };

        let body = GeneralResponse::error(detail);
        (status, Json(body)).into_response()
    }
}

impl From<TitleError> for ApiError {
    fn from(err: TitleError) -> Self {
        match err {
            TitleError::NotFound(_) => Self::NotFound(err.to_string()),
            TitleError::Validation(msg) => Self::ValidationError(msg),
            TitleError::Unauthorized => Self::Unauthorized(err.to_string()),
            TitleError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_error_status_mapping() {
        let cases = [
            (TitleError::NotFound(3), StatusCode::NOT_FOUND),
            (
                TitleError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (TitleError::Unauthorized, StatusCode::FORBIDDEN),
            (
                TitleError::Database("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_key() {
        let err = ApiError::from(TitleError::NotFound(17));
        assert_eq!(
            err.to_string(),
            "Not found: Title record not found for primary key: 17"
        );
    }
}
