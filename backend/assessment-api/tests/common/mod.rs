#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use course_assessment::{
    config::Config,
    create_router,
    models::question_set::{QuestionSet, QuestionSetFile},
    services::{content_service::ContentLibrary, AppState},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const QUIZ_SET: &str = "coshh-basics";
pub const CHECK_SET: &str = "coshh-checks";

pub fn create_test_app() -> Router {
    create_test_app_with(Config::default())
}

pub fn create_test_app_with(config: Config) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let mut content = ContentLibrary::default();
    content.insert(question_set(quiz_set())).unwrap();
    content.insert(question_set(check_set())).unwrap();

    create_router(Arc::new(AppState::with_content(config, content)))
}

fn question_set(value: Value) -> QuestionSet {
    let file: QuestionSetFile = serde_json::from_value(value).unwrap();
    QuestionSet::from_file(file).unwrap()
}

/// Three questions with correct answers 1, 1, 2.
pub fn quiz_set() -> Value {
    json!({
        "id": QUIZ_SET,
        "title": "COSHH Basics",
        "description": "Short end-of-section quiz",
        "questions": [
            {
                "id": 1,
                "question": "What does COSHH stand for?",
                "options": [
                    "Control of Substances Harmful to Humans",
                    "Control of Substances Hazardous to Health",
                    "Code of Standards for Hazardous Health"
                ],
                "correctAnswer": 1,
                "explanation": "Control of Substances Hazardous to Health.",
                "section": "1.1",
                "difficulty": "basic"
            },
            {
                "id": 2,
                "question": "Which substance has its own regulations?",
                "options": ["Solvent", "Asbestos", "Silica dust"],
                "correctAnswer": "Asbestos",
                "explanation": "Asbestos is covered by CAR 2012.",
                "section": "1.1",
                "difficulty": "intermediate"
            },
            {
                "id": 3,
                "question": "What comes first in the 8 essentials?",
                "options": ["PPE", "Surveillance", "Assess the risks"],
                "correctAnswer": 2,
                "explanation": "Assessment always comes first.",
                "section": "1.2"
            }
        ]
    })
}

pub fn check_set() -> Value {
    json!({
        "id": CHECK_SET,
        "title": "COSHH Quick Checks",
        "questions": [
            {
                "id": "coshh-not-covered",
                "question": "Which of these is NOT covered by COSHH?",
                "options": ["PVC solvent", "Silica dust", "Asbestos fibres", "Expanding foam"],
                "correctIndex": 2,
                "explanation": "Asbestos has its own legislation."
            }
        ]
    })
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "non-JSON body with status {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )
        })
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "POST", uri, None).await
}
