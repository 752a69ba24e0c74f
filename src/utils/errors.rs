use std::error::Error;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mongodb::error::Error as MongoError;
use serde_json::json;
use thiserror::Error;

use crate::domain::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    MongoError(#[from] MongoError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) | ApiError::InvalidData(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) | ApiError::MongoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.status_code().as_u16();

        let body = match self {
            ApiError::Conflict(message)
            | ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message)
            | ApiError::InternalServerError(message)
            | ApiError::InvalidData(message) => json!({ "error": message, "code": code }),
            ApiError::Validation(errors) => json!({
                "error": "Validation failed",
                "code": code,
                "fields": errors
            }),
            ApiError::MongoError(error) => {
                tracing::error!(error = %error, "database operation failed");
                json!({
                    "error": format!("Database error: {}", error),
                    "code": code,
                    "details": error.source().map(|src| src.to_string())
                })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
