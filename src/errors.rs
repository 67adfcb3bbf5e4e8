use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use thiserror::Error;

use crate::auth::jwt::TokenError;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    /// A path id that does not parse as an integer. Reported to clients the
    /// same way as a missing row.
    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("This endpoint only accepts json")]
    NotAcceptable,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn invalid_payload() -> Self {
        AppError::ValidationError("Invalid payload".to_string())
    }

    pub fn empty_payload() -> Self {
        AppError::ValidationError("Empty payload".to_string())
    }

    /// Names the resource behind a duplicate-key failure. Other errors pass
    /// through unchanged.
    pub fn on_conflict(self, message: &str) -> Self {
        match self {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(message.to_string()),
            other => other,
        }
    }

    /// Text placed in the `message` field of the response envelope.
    pub fn client_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Envelope shared by every response: `{"status": "success"|"fail", "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidId(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "fail",
            message: self.client_message(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return AppError::AlreadyExists("Resource already exists".to_string());
        }
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        log::debug!("payload rejected: {}", err);
        AppError::invalid_payload()
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("password hashing failed: {}", err))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::Unauthorized("Please log in again.".to_string()),
            TokenError::Malformed => AppError::Unauthorized("Unauthorized".to_string()),
            TokenError::Signing(msg) => AppError::InternalError(msg),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

pub type AppResult<T> = Result<T, AppError>;
