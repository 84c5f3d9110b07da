use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::engine::AssessmentError;
use crate::services::{AppState, ServiceError};

pub mod inline_checks;
pub mod question_sets;
pub mod quizzes;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    Unavailable(String),
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Assessment(AssessmentError::InvalidQuestionData { .. }) => {
                ApiError::Unprocessable(message)
            }
            ServiceError::Assessment(AssessmentError::InvalidSelection { .. }) => {
                ApiError::BadRequest(message)
            }
            ServiceError::Assessment(
                AssessmentError::NoSelectionMade
                | AssessmentError::QuestionNotAnswered
                | AssessmentError::InvalidTransition { .. },
            ) => ApiError::Conflict(message),
            ServiceError::NotFound(_) => ApiError::NotFound(message),
            ServiceError::BadRequest(_) => ApiError::BadRequest(message),
            ServiceError::CapacityExceeded(_) => ApiError::Unavailable(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::bad_request(format!("Validation error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Unavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
        };
        let json_response = json!({
            "message": message,
            "status": status.as_u16()
        });
        (status, Json(json_response)).into_response()
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "course-assessment-api",
            "version": env!("CARGO_PKG_VERSION"),
            "content": {
                "question_sets": state.content.len(),
                "questions": state.content.question_count()
            },
            "assessments": {
                "active": state.assessments.active_count().await,
                "capacity": state.assessments.capacity()
            }
        })),
    )
}
