use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::titles::credential;
use super::{ApiError, AppState, GeneralResponse};

/// `GET /` outside the versioned prefix.
pub async fn root() -> Json<GeneralResponse> {
    Json(GeneralResponse::warning(
        "No such path. Please use '/api/v1' in future requests.",
    ))
}

/// `GET /api/v1/`
pub async fn home() -> Json<GeneralResponse> {
    Json(GeneralResponse::success(
        "Welcome to the Streaming Titles API!",
    ))
}

/// `GET /api/v1/health`
///
/// Reports 503 when the store does not answer a trivial query.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<GeneralResponse>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(GeneralResponse::success("The API is up and running!")),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {e:#}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(GeneralResponse::error("The database is not reachable.")),
            )
        }
    }
}

/// `GET /api/v1/secure`
///
/// Lets clients verify their key before attempting a mutation.
pub async fn secure(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GeneralResponse>, ApiError> {
    state.title_service.authorize(credential(&headers))?;
    Ok(Json(GeneralResponse::success(
        "You have successfully accessed a secure route!",
    )))
}
