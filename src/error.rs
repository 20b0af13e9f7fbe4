use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("No user with this email was found")]
    UserNotFound,
    #[error("Email is already registered")]
    DuplicateEmail,
    #[error("You have already reviewed this product")]
    DuplicateReview,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("No {what} with {id} id was found")]
    NotFound { what: &'static str, id: i32 },
    #[error("{0}")]
    Validation(String),
    #[error("Operation timed out")]
    Timeout,
    #[error("Failed to generate session token")]
    SessionGeneration,
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

//what the logging middleware sees after a failure; the response body only
//ever carries the public message
#[derive(Clone, Debug)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::UserNotFound => "user_not_found",
            ApiError::DuplicateEmail => "duplicate_email",
            ApiError::DuplicateReview => "duplicate_review",
            ApiError::EmptyCart => "empty_cart",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Validation(_) => "validation",
            ApiError::Timeout => "timeout",
            ApiError::SessionGeneration => "session_generation",
            ApiError::Storage(_) => "storage",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::DuplicateReview => StatusCode::CONFLICT,
            ApiError::EmptyCart => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::SessionGeneration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            //internal detail stays in the logs
            ApiError::Storage(_) | ApiError::SessionGeneration => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = ErrorDetail {
            kind: self.kind(),
            message: self.to_string(),
        };
        let mut response = (
            self.status(),
            Json(json!({
                "error": self.public_message()
            })),
        )
            .into_response();
        response.extensions_mut().insert(detail);
        response
    }
}
