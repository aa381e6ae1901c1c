//! Video catalog endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Router,
};
use neovideo_core::models::HomeItem;
use neovideo_providers::{Category, ListResult};
use serde::Deserialize;

use crate::http::error::AppResult;
use crate::http::response::ApiResponse;
use crate::http::AppState;

pub fn create_vod_router() -> Router<AppState> {
    Router::new()
        .route("/api/vod/home", get(home))
        .route("/api/vod/{id}/categories", get(categories))
        .route("/api/vod/{id}/search", get(search))
        .route("/api/vod/{id}/detail/{vod_id}", get(detail))
}

/// Query parameters for a source search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub wd: String,
    pub pg: Option<u32>,
}

/// GET /api/vod/home - Cached home aggregate of every source
pub async fn home(State(state): State<AppState>) -> AppResult<ApiResponse<Arc<Vec<HomeItem>>>> {
    Ok(ApiResponse::ok(state.vod.home().await?))
}

/// GET /api/vod/{id}/categories
pub async fn categories(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    Ok(ApiResponse::ok(state.vod.categories(id).await?))
}

/// GET /api/vod/{id}/search?wd=&pg=
pub async fn search(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<ApiResponse<ListResult>> {
    let Query(query) = query?;
    let result = state
        .vod
        .search(id, &query.wd, query.pg.unwrap_or(1))
        .await?;
    Ok(ApiResponse::ok(result))
}

/// GET /api/vod/{id}/detail/{vod_id}
pub async fn detail(
    Path((id, vod_id)): Path<(i64, u64)>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ListResult>> {
    Ok(ApiResponse::ok(state.vod.detail(id, vod_id).await?))
}
