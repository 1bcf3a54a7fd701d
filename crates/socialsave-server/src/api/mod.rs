mod analyze;
mod history;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socialsave_core::{detect_platform, Platform};
use socialsave_gemini::{AnalysisError, Analyzer};
use socialsave_history::{HistoryCache, KeyValueStore};
use tokio::sync::{Mutex, Semaphore};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// History behind an async mutex; the store is boxed so tests can swap in
/// an in-memory one.
pub type SharedHistory = Arc<Mutex<HistoryCache<Box<dyn KeyValueStore + Send>>>>;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured.
    pub analyzer: Option<Arc<Analyzer>>,
    pub history: SharedHistory,
    /// One permit: at most one analysis in flight.
    pub analysis_slot: Arc<Semaphore>,
}

impl AppState {
    pub fn new(analyzer: Option<Analyzer>, store: Box<dyn KeyValueStore + Send>) -> Self {
        Self {
            analyzer: analyzer.map(Arc::new),
            history: Arc::new(Mutex::new(HistoryCache::load(store))),
            analysis_slot: Arc::new(Semaphore::new(1)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    analysis: &'static str,
    history_entries: usize,
}

#[derive(Debug, Deserialize)]
struct PlatformQuery {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Serialize)]
struct PlatformData {
    platform: Platform,
    display_name: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "configuration_error" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" | "upstream_format_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Map an analysis failure to an API error. The message is the
/// user-facing text of the error.
pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    let code = match error {
        AnalysisError::MissingApiKey | AnalysisError::Misconfigured(_) => "configuration_error",
        AnalysisError::InvalidRequest(_) => "bad_request",
        AnalysisError::Inaccessible => "upstream_error",
        AnalysisError::MalformedResponse => "upstream_format_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

pub(super) fn map_history_error(
    request_id: String,
    error: &socialsave_history::HistoryError,
) -> ApiError {
    tracing::error!(error = %error, "history storage failed");
    ApiError::new(request_id, "internal_error", "history storage failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/platform", get(platform))
        .route("/api/v1/analyze", post(analyze::analyze_post))
        .route(
            "/api/v1/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/api/v1/history/{id}", get(history::get_history_entry))
        .route(
            "/api/v1/history/{id}/archive",
            get(history::get_history_archive),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    let history_entries = state.history.lock().await.len();
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            analysis: if state.analyzer.is_some() {
                "configured"
            } else {
                "missing_api_key"
            },
            history_entries,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn platform(
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PlatformQuery>,
) -> Json<ApiResponse<PlatformData>> {
    let platform = detect_platform(&query.url);
    Json(ApiResponse {
        data: PlatformData {
            platform,
            display_name: platform.display_name(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
