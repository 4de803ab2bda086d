use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients for every failed request.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Middleware error: {0}")]
    Middleware(String),
}

impl From<tower::BoxError> for AppError {
    fn from(error: tower::BoxError) -> Self {
        if error.is::<tower::timeout::error::Elapsed>() {
            AppError::Timeout
        } else {
            AppError::Middleware(error.to_string())
        }
    }
}

// Every failure is terminal for the request and reported as a plain 500.
// The details stay in the server log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let body = Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type Result<T> = std::result::Result<T, AppError>;
