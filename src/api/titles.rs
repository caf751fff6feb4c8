use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::validation::parse_list_query;
use super::{ApiError, AppState};
use crate::constants::API_KEY_HEADER;
use crate::models::title::{NewTitle, Title, TitlePatch};
use crate::services::title_service::TitlePage;

pub(super) fn credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn primary_key(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(pk)| pk)
        .map_err(|e| ApiError::validation(format!("Invalid primary key: {e}")))
}

/// Same as [`primary_key`] for mutating routes: a malformed key is only
/// reported once the credential has been accepted.
fn guarded_primary_key(
    state: &AppState,
    headers: &HeaderMap,
    path: Result<Path<i32>, PathRejection>,
) -> Result<i32, ApiError> {
    if path.is_err() {
        state.title_service.authorize(credential(headers))?;
    }
    primary_key(path)
}

/// Rejects a malformed body, but only after the credential has been checked
/// so callers without a key always see 403.
fn body<T>(
    state: &AppState,
    headers: &HeaderMap,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            state.title_service.authorize(credential(headers))?;
            Err(ApiError::validation(rejection.body_text()))
        }
    }
}

/// `GET /api/v1/titles` and `GET /api/v1/title-pages`
pub async fn list_titles(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TitlePage>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let (window, filter) = parse_list_query(pairs)?;

    let page = state.title_service.list(window, &filter).await?;
    Ok(Json(page))
}

/// `GET /api/v1/titles/{pk}`
pub async fn get_title(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Title>, ApiError> {
    let pk = primary_key(path)?;
    let title = state.title_service.get(pk).await?;
    Ok(Json(title))
}

/// `POST /api/v1/titles`
pub async fn create_title(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NewTitle>, JsonRejection>,
) -> Result<(StatusCode, Json<Title>), ApiError> {
    let payload = body(&state, &headers, payload)?;

    let title = state
        .title_service
        .create(payload, credential(&headers))
        .await?;

    Ok((StatusCode::CREATED, Json(title)))
}

/// `PATCH /api/v1/titles/{pk}`
pub async fn update_title(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<TitlePatch>, JsonRejection>,
) -> Result<Json<Title>, ApiError> {
    let pk = guarded_primary_key(&state, &headers, path)?;
    let patch = body(&state, &headers, payload)?;

    let title = state
        .title_service
        .update(pk, patch, credential(&headers))
        .await?;

    Ok(Json(title))
}

/// `DELETE /api/v1/titles/{pk}`
pub async fn delete_title(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let pk = guarded_primary_key(&state, &headers, path)?;

    state
        .title_service
        .delete(pk, credential(&headers))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
