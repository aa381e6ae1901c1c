use neovideo_providers::ProviderClientError;
use thiserror::Error;

/// Core error type.
///
/// `Clone` so a single failed load can be handed to every caller waiting on
/// the same single-flight key.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("no CMS source registered")]
    EmptyRegistry,

    #[error("Upstream error: {0}")]
    Provider(#[from] ProviderClientError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().unwrap_or_default();
                match code.as_ref() {
                    // unique_violation
                    "23505" => Self::AlreadyExists("Resource already exists".to_string()),
                    // foreign_key_violation
                    "23503" => Self::NotFound("Referenced resource not found".to_string()),
                    // check_violation
                    "23514" => Self::InvalidInput("Constraint check failed".to_string()),
                    // not_null_violation
                    "23502" => Self::InvalidInput("Required field is missing".to_string()),
                    _ => Self::Database(err.to_string()),
                }
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
