//! Parse-proxy administration and bulk import

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use neovideo_core::models::{JiexiSource, ParseRecord};
use neovideo_core::service::ImportOutcome;
use serde::Deserialize;

use crate::http::error::AppResult;
use crate::http::response::ApiResponse;
use crate::http::AppState;

pub fn create_jiexi_router() -> Router<AppState> {
    Router::new()
        .route("/api/jiexi", get(list_records).post(create_record))
        .route("/api/jiexi/{id}", delete(delete_record))
        .route("/api/jiexi/batch_import", post(batch_import))
}

/// Bulk import request: the raw pasted text
#[derive(Debug, Deserialize)]
pub struct BatchImportRequest {
    #[serde(default)]
    pub data: String,
}

/// GET /api/jiexi
pub async fn list_records(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<JiexiSource>>> {
    Ok(ApiResponse::ok(state.jiexi.list().await?))
}

/// POST /api/jiexi
pub async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<ParseRecord>, JsonRejection>,
) -> AppResult<ApiResponse<JiexiSource>> {
    let Json(record) = payload?;
    Ok(ApiResponse::ok(state.jiexi.create(record).await?))
}

/// DELETE /api/jiexi/{id}
pub async fn delete_record(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<i64>> {
    state.jiexi.delete(id).await?;
    Ok(ApiResponse::ok(id).with_message("deleted"))
}

/// POST /api/jiexi/batch_import
///
/// Empty input, or input without a single usable record, answers
/// `success: false` with status 200.
pub async fn batch_import(
    State(state): State<AppState>,
    payload: Result<Json<BatchImportRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;

    let response = match state.jiexi.batch_import(&request.data).await? {
        ImportOutcome::Empty => ApiResponse::message(false, "nothing to import").into_response(),
        ImportOutcome::Imported(count) => {
            ApiResponse::ok(count)
                .with_message(format!("imported {count} record(s)"))
                .into_response()
        }
    };
    Ok(response)
}
