use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use socialsave_core::Post;
use socialsave_history::{archive_file_name, archive_json};

use crate::middleware::RequestId;

use super::{map_history_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ClearedData {
    cleared: usize,
}

pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Post>>> {
    let data = state.history.lock().await.entries().to_vec();
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn clear_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ClearedData>>, ApiError> {
    let mut history = state.history.lock().await;
    let cleared = history.len();
    history
        .clear()
        .map_err(|e| map_history_error(req_id.0.clone(), &e))?;
    tracing::info!(request_id = %req_id.0, cleared, "history cleared");

    Ok(Json(ApiResponse {
        data: ClearedData { cleared },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_history_entry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .history
        .lock()
        .await
        .select(&id)
        .cloned()
        .ok_or_else(|| not_found(&req_id, &id))?;

    Ok(Json(ApiResponse {
        data: post,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// The bare record as a JSON attachment named after the archive convention.
pub(super) async fn get_history_archive(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let post = state
        .history
        .lock()
        .await
        .select(&id)
        .cloned()
        .ok_or_else(|| not_found(&req_id, &id))?;

    let body = archive_json(&post).map_err(|e| {
        tracing::error!(error = %e, id = %post.id, "archive serialization failed");
        ApiError::new(req_id.0.clone(), "internal_error", "archive serialization failed")
    })?;
    let disposition = format!("attachment; filename=\"{}\"", archive_file_name(&post));
    let disposition = HeaderValue::from_str(&disposition).map_err(|e| {
        tracing::error!(error = %e, "invalid content-disposition header");
        ApiError::new(req_id.0.clone(), "internal_error", "archive header invalid")
    })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

fn not_found(req_id: &RequestId, id: &str) -> ApiError {
    ApiError::new(
        req_id.0.clone(),
        "not_found",
        format!("history entry '{id}' not found"),
    )
}
