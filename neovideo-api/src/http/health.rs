//! Liveness probe

use axum::{routing::get, Router};

use crate::http::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Answers as long as the process serves HTTP; upstream CMS state is not checked.
pub async fn health_check() -> &'static str {
    "OK"
}
