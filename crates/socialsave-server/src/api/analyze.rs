use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use socialsave_core::Post;
use socialsave_gemini::AnalysisError;

use crate::middleware::RequestId;

use super::{map_analysis_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    url: String,
}

/// Analyze a URL and record the result.
///
/// Only one analysis runs at a time; a concurrent request gets `conflict`
/// immediately instead of queueing. History is touched only after the
/// model call returns.
pub(super) async fn analyze_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let Some(analyzer) = state.analyzer.clone() else {
        return Err(map_analysis_error(
            req_id.0,
            &AnalysisError::MissingApiKey,
        ));
    };

    // Released on every exit path when the permit drops.
    let Ok(_permit) = state.analysis_slot.try_acquire() else {
        return Err(ApiError::new(
            req_id.0,
            "conflict",
            "analysis already in progress",
        ));
    };

    let post = analyzer.analyze(&body.url).await.map_err(|e| {
        tracing::warn!(request_id = %req_id.0, url = %body.url, error = %e, "analysis failed");
        map_analysis_error(req_id.0.clone(), &e)
    })?;

    {
        let mut history = state.history.lock().await;
        if let Err(e) = history.record(post.clone()) {
            tracing::warn!(request_id = %req_id.0, error = %e, "analysis succeeded but history could not be saved");
        }
    }

    Ok(Json(ApiResponse {
        data: post,
        meta: ResponseMeta::new(req_id.0),
    }))
}
