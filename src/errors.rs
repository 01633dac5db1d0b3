use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Quiz not found")]
    QuizNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Chapter not found")]
    ChapterNotFound,

    #[error("Course not found")]
    CourseNotFound,

    #[error("Curriculum not found")]
    CurriculumNotFound,

    #[error("Token not found")]
    TokenNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid access")]
    InvalidAccess,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::QuizNotFound
            | AppError::UserNotFound
            | AppError::ChapterNotFound
            | AppError::CourseNotFound
            | AppError::CurriculumNotFound
            | AppError::TokenNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidToken | AppError::InvalidAccess | AppError::PermissionDenied => {
                StatusCode::FORBIDDEN
            }
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side failures are logged with detail but never leaked.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("{}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            code: status.as_u16(),
            message,
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::InternalError(format!("BSON deserialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::InternalError(format!("Upstream request failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
