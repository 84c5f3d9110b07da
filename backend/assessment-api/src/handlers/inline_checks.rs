use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{inline_check::CreateInlineCheckRequest, SelectOptionRequest},
    services::{inline_check_service::InlineCheckService, AppState},
};

/// POST /api/v1/inline-checks
pub async fn create_check(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateInlineCheckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = InlineCheckService::new(&state).create_check(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/inline-checks/{id}
pub async fn get_check(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let view = InlineCheckService::new(&state).get_check(check_id).await?;
    Ok(Json(view))
}

/// POST /api/v1/inline-checks/{id}/selection
pub async fn select_option(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<Uuid>,
    AppJson(req): AppJson<SelectOptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = InlineCheckService::new(&state)
        .select(check_id, req.option_index)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/inline-checks/{id}/commit
pub async fn commit_answer(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reveal = InlineCheckService::new(&state).commit(check_id).await?;
    Ok(Json(reveal))
}

/// DELETE /api/v1/inline-checks/{id}
pub async fn discard(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    InlineCheckService::new(&state).discard(check_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
