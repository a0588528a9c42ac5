use sqlx::error::ErrorKind;
use thiserror::Error;

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Service is temporarily unavailable. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    /// sign up / sign in rejected by the identity provider
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    /// table operation rejected by the database
    #[error("{message}")]
    Persistence { message: String, constraint: bool },

    #[error("{0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    /// no backend connection for this request
    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => AppError::Persistence {
                message: db_err.message().to_string(),
                constraint: !matches!(db_err.kind(), ErrorKind::Other),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::ServiceUnavailable
            }
            _ => AppError::Persistence {
                message: err.to_string(),
                constraint: false,
            },
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(_: r2d2::Error) -> Self {
        AppError::ServiceUnavailable
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.into())
    }
}
