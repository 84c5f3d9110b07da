use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{
        quiz::{CreateQuizRequest, ReviewQuery},
        SelectOptionRequest,
    },
    services::{quiz_service::QuizService, AppState},
};

/// POST /api/v1/quizzes
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    tracing::info!(
        "Creating quiz: question_set_id={:?}, inline_questions={}",
        req.question_set_id,
        req.questions.as_ref().map_or(0, Vec::len)
    );

    let response = QuizService::new(&state).create_quiz(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let view = QuizService::new(&state).get_quiz(quiz_id).await?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/selection
pub async fn select_option(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
    AppJson(req): AppJson<SelectOptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = QuizService::new(&state)
        .select(quiz_id, req.option_index)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/commit
pub async fn commit_answer(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let response = QuizService::new(&state).commit(quiz_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/quizzes/{id}/advance
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let view = QuizService::new(&state).advance(quiz_id).await?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/restart
pub async fn restart(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let view = QuizService::new(&state).restart(quiz_id).await?;
    Ok(Json(view))
}

/// GET /api/v1/quizzes/{id}/review?filter=all|correct|incorrect
pub async fn review(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
    Query(query): Query<ReviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let response = QuizService::new(&state)
        .review(quiz_id, query.filter)
        .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn discard(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    QuizService::new(&state).discard(quiz_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
