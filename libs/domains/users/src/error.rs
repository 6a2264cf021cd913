use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::postgres::{DbErr, DbErrorKind, classify};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("User with ID {0} not found")]
    NotFound(i64),

    #[error("Email '{0}' already registered")]
    EmailTaken(String),

    #[error("Username '{0}' already taken")]
    UsernameTaken(String),

    /// Commit-time uniqueness failure, already worded for the caller.
    #[error("{0}")]
    Conflict(String),

    /// Raised by a store when a unique index rejects a write.
    /// The service rewords it into [`UserError::Conflict`].
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        UserError::InvalidArgument(msg.into())
    }
}

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        match classify(&err) {
            DbErrorKind::UniqueViolation(detail) => UserError::UniqueViolation(detail),
            DbErrorKind::Unavailable => UserError::Unavailable(err.to_string()),
            DbErrorKind::Other => UserError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::InvalidArgument(msg) => AppError::BadRequest(msg),
            UserError::NotFound(id) => AppError::NotFound(format!("User with ID {} not found", id)),
            UserError::EmailTaken(email) => {
                AppError::Conflict(format!("Email '{}' already registered", email))
            }
            UserError::UsernameTaken(username) => {
                AppError::Conflict(format!("Username '{}' already taken", username))
            }
            UserError::Conflict(msg) => AppError::Conflict(msg),
            UserError::UniqueViolation(_) => {
                AppError::Conflict("User with this email or username already exists".to_string())
            }
            UserError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
