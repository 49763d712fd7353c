//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::dto::*;
use super::state::AppState;

/// Default number of stop search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on stop search results.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/locate", post(locate))
        .route("/api/stops/search", get(search_stops))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a free-text query to the nearest washroom.
///
/// Per-query failures are still 200s; only unusable requests are errors.
async fn locate(State(state): State<AppState>, body: Bytes) -> Result<Json<QueryResponse>, AppError> {
    // Parse JSON manually so the rejection has our error shape
    let req: LocateRequest = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON: {e}"),
    })?;

    if req.query.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Query must not be empty".to_string(),
        });
    }

    let result = state.resolver.process_query(&req.query);
    Ok(Json(QueryResponse::from_result(&result)))
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = search_limit(req.limit);
    let resolver = &state.resolver;

    let stops = resolver
        .matcher()
        .search(&req.q, resolver.catalog(), limit)
        .iter()
        .map(StopSearchResult::from_scored)
        .collect();

    Json(StopSearchResponse { stops })
}

/// Requested result count, defaulted and capped.
fn search_limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        tracing::warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
