//! CMS source administration

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};
use neovideo_core::models::{CmsSource, NewCmsSource};
use neovideo_core::repository::CmsSourceStore;

use crate::http::error::AppResult;
use crate::http::response::ApiResponse;
use crate::http::AppState;

pub fn create_maccms_router() -> Router<AppState> {
    Router::new()
        .route("/api/maccms", get(list_sources).post(create_source))
        .route("/api/maccms/{id}", delete(delete_source))
}

/// GET /api/maccms
pub async fn list_sources(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CmsSource>>> {
    Ok(ApiResponse::ok(state.cms_sources.list().await?))
}

/// POST /api/maccms
pub async fn create_source(
    State(state): State<AppState>,
    payload: Result<Json<NewCmsSource>, JsonRejection>,
) -> AppResult<ApiResponse<CmsSource>> {
    let Json(payload) = payload?;
    let source = state.cms_sources.create(&payload.normalize()?).await?;
    tracing::info!(source_id = source.id, api = %source.api, "CMS source registered");
    Ok(ApiResponse::ok(source))
}

/// DELETE /api/maccms/{id}
pub async fn delete_source(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<i64>> {
    state.cms_sources.delete(id).await?;
    tracing::info!(source_id = id, "CMS source deleted");
    Ok(ApiResponse::ok(id).with_message("deleted"))
}
