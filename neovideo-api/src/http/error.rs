// HTTP error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use neovideo_providers::ProviderClientError;
use std::fmt;

use super::response::ApiResponse;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

/// Errors use the same envelope as successes, with `success: false`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, ApiResponse::message(false, self.message)).into_response()
    }
}

impl From<neovideo_core::Error> for AppError {
    fn from(err: neovideo_core::Error) -> Self {
        use neovideo_core::Error;

        match err {
            Error::NotFound(msg) => Self::not_found(msg),
            Error::AlreadyExists(msg) => Self::conflict(msg),
            Error::InvalidInput(msg) => Self::bad_request(msg),
            Error::EmptyRegistry => Self::service_unavailable(Error::EmptyRegistry.to_string()),
            Error::Provider(e) => e.into(),
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                Self::internal_server_error("Database error")
            }
            Error::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                Self::internal_server_error("Data processing error")
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<ProviderClientError> for AppError {
    fn from(err: ProviderClientError) -> Self {
        match &err {
            ProviderClientError::NotImplemented(_) | ProviderClientError::UnsupportedFormat(_) => {
                Self::not_implemented(err.to_string())
            }
            ProviderClientError::InvalidConfig(_) => {
                tracing::error!("Misconfigured CMS source: {}", err);
                Self::internal_server_error(err.to_string())
            }
            _ if err.is_transport() => {
                tracing::warn!("CMS backend unreachable: {}", err);
                Self::bad_gateway(err.to_string())
            }
            _ => {
                tracing::error!("Unusable CMS response: {}", err);
                Self::bad_gateway(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
