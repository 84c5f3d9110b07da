use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::models::question_set::QuestionSetSummary;
use crate::services::AppState;

/// GET /api/v1/question-sets
pub async fn list_question_sets(State(state): State<Arc<AppState>>) -> Json<Vec<QuestionSetSummary>> {
    Json(state.content.summaries())
}

/// GET /api/v1/question-sets/{id}
pub async fn get_question_set(
    State(state): State<Arc<AppState>>,
    Path(set_id): Path<String>,
) -> Result<Json<QuestionSetSummary>, ApiError> {
    state
        .content
        .get(&set_id)
        .map(|set| Json(set.summary()))
        .ok_or_else(|| ApiError::NotFound(format!("Question set {} not found", set_id)))
}
