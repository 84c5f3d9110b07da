use axum::{http::StatusCode, Router};
use course_assessment::config::Config;
use serde_json::{json, Value};

mod common;

use common::{get, post, post_empty, send, QUIZ_SET};

async fn start_quiz(app: &Router, body: Value) -> String {
    let (status, json) = post(app, "/api/v1/quizzes", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["assessment_id"].as_str().unwrap().to_string()
}

async fn answer(app: &Router, id: &str, option_index: usize) -> Value {
    let (status, json) = post(
        app,
        &format!("/api/v1/quizzes/{}/selection", id),
        json!({ "option_index": option_index }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", json);

    let (status, json) = post_empty(app, &format!("/api/v1/quizzes/{}/commit", id)).await;
    assert_eq!(status, StatusCode::OK, "{}", json);
    json
}

async fn advance(app: &Router, id: &str) -> Value {
    let (status, json) = post_empty(app, &format!("/api/v1/quizzes/{}/advance", id)).await;
    assert_eq!(status, StatusCode::OK, "{}", json);
    json
}

#[tokio::test]
async fn test_full_quiz_run_scores_and_bands() {
    let app = common::create_test_app();
    let id = start_quiz(
        &app,
        json!({
            "question_set_id": QUIZ_SET,
            "pass_threshold": 0.7,
            "marginal_threshold": 0.6
        }),
    )
    .await;

    let (_, view) = get(&app, &format!("/api/v1/quizzes/{}", id)).await;
    assert_eq!(view["status"], "in_progress");
    assert_eq!(view["title"], "COSHH Basics");
    assert_eq!(view["total"], 3);
    assert_eq!(view["current"]["index"], 0);
    assert!(view["current"].get("correct_index").is_none());

    let commit = answer(&app, &id, 1).await;
    assert_eq!(commit["reveal"]["is_correct"], true);
    assert_eq!(commit["reveal"]["correct_option_index"], 1);
    assert_eq!(
        commit["running_score"],
        json!({ "correct": 1, "answered": 1, "total": 3 })
    );
    assert_eq!(advance(&app, &id).await["current_index"], 1);

    let commit = answer(&app, &id, 0).await;
    assert_eq!(commit["reveal"]["is_correct"], false);
    assert_eq!(commit["reveal"]["explanation"], "Asbestos is covered by CAR 2012.");
    advance(&app, &id).await;

    answer(&app, &id, 2).await;
    let done = advance(&app, &id).await;
    assert_eq!(done["status"], "completed");
    assert_eq!(done["summary"]["score"]["correct"], 2);
    assert_eq!(done["summary"]["score"]["total"], 3);
    assert_eq!(done["summary"]["percentage"], 67);
    assert_eq!(done["summary"]["band"], "marginal");
}

#[tokio::test]
async fn test_band_is_absent_without_thresholds() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    for option in [1, 1, 2] {
        answer(&app, &id, option).await;
        advance(&app, &id).await;
    }

    let (_, view) = get(&app, &format!("/api/v1/quizzes/{}", id)).await;
    assert_eq!(view["summary"]["percentage"], 100);
    assert!(view["summary"]["band"].is_null());
}

#[tokio::test]
async fn test_configured_banding_applies_by_default() {
    let config = Config {
        pass_threshold: Some(0.7),
        marginal_threshold: Some(0.6),
        ..Config::default()
    };
    let app = common::create_test_app_with(config);
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    for option in [0, 0, 0] {
        answer(&app, &id, option).await;
        advance(&app, &id).await;
    }

    let (_, view) = get(&app, &format!("/api/v1/quizzes/{}", id)).await;
    assert_eq!(view["summary"]["score"]["correct"], 0);
    assert_eq!(view["summary"]["band"], "fail");
}

#[tokio::test]
async fn test_out_of_order_actions_are_conflicts() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    let (status, json) = post_empty(&app, &format!("/api/v1/quizzes/{}/commit", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);

    let (status, _) = post_empty(&app, &format!("/api/v1/quizzes/{}/advance", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = get(&app, &format!("/api/v1/quizzes/{}/review", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Nothing above moved the quiz
    let (_, view) = get(&app, &format!("/api/v1/quizzes/{}", id)).await;
    assert_eq!(view["current_index"], 0);
    assert!(view["current"]["selected_option_index"].is_null());
}

#[tokio::test]
async fn test_selection_rules() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;
    let select = format!("/api/v1/quizzes/{}/selection", id);

    let (status, json) = post(&app, &select, json!({ "option_index": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", json);

    // Re-selecting before commit replaces the choice
    post(&app, &select, json!({ "option_index": 0 })).await;
    let (_, view) = post(&app, &select, json!({ "option_index": 1 })).await;
    assert_eq!(view["current"]["selected_option_index"], 1);

    let first = post_empty(&app, &format!("/api/v1/quizzes/{}/commit", id)).await;
    let (status, _) = post(&app, &select, json!({ "option_index": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Repeated commit returns the same reveal
    let second = post_empty(&app, &format!("/api/v1/quizzes/{}/commit", id)).await;
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(first.1["reveal"], second.1["reveal"]);
    assert_eq!(second.1["running_score"]["answered"], 1);
}

#[tokio::test]
async fn test_review_filters_after_completion() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    for option in [1, 0, 2] {
        answer(&app, &id, option).await;
        advance(&app, &id).await;
    }

    let (status, all) = get(&app, &format!("/api/v1/quizzes/{}/review", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["filter"], "all");
    assert_eq!(all["items"].as_array().unwrap().len(), 3);

    let (_, incorrect) = get(&app, &format!("/api/v1/quizzes/{}/review?filter=incorrect", id)).await;
    let items = incorrect["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["question_id"], 2);
    assert_eq!(items[0]["selected_option_index"], 0);
    assert_eq!(items[0]["correct_option_index"], 1);

    let (_, correct) = get(&app, &format!("/api/v1/quizzes/{}/review?filter=correct", id)).await;
    assert_eq!(correct["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_restart_clears_progress() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    answer(&app, &id, 1).await;
    advance(&app, &id).await;

    let (status, view) = post_empty(&app, &format!("/api/v1/quizzes/{}/restart", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "in_progress");
    assert_eq!(view["current_index"], 0);
    assert_eq!(view["running_score"]["answered"], 0);
    assert!(view["current"]["selected_option_index"].is_null());
}

#[tokio::test]
async fn test_inline_questions_are_normalized() {
    let app = common::create_test_app();
    let (status, json) = post(
        &app,
        "/api/v1/quizzes",
        json!({
            "title": "Page quiz",
            "quiz_id": "section-2",
            "questions": [
                { "id": "a", "question": "Pick b", "options": ["a", "b"], "correctAnswer": "b", "explanation": "" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    assert_eq!(json["quiz"]["quiz_id"], "section-2");
    assert_eq!(json["quiz"]["total"], 1);

    let id = json["assessment_id"].as_str().unwrap().to_string();
    let commit = answer(&app, &id, 1).await;
    assert_eq!(commit["reveal"]["is_correct"], true);
}

#[tokio::test]
async fn test_invalid_question_data_is_unprocessable() {
    let app = common::create_test_app();
    let (status, json) = post(
        &app,
        "/api/v1/quizzes",
        json!({
            "questions": [
                { "id": 1, "question": "Q", "options": ["a", "b"], "correctAnswer": 5, "explanation": "" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", json);
    assert!(json["message"].as_str().unwrap().contains("question 1"), "{}", json);

    let (status, _) = post(&app, "/api/v1/quizzes", json!({ "questions": [] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_create_requests() {
    let app = common::create_test_app();

    let (status, _) = post(&app, "/api/v1/quizzes", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/quizzes",
        json!({ "question_set_id": QUIZ_SET, "pass_threshold": 1.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/quizzes",
        json!({ "question_set_id": QUIZ_SET, "pass_threshold": 0.5, "marginal_threshold": 0.6 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/v1/quizzes", json!({ "question_set_id": "missing" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = post(
        &app,
        "/api/v1/quizzes",
        json!({ "question_set_id": QUIZ_SET, "shuffle": true }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
}

#[tokio::test]
async fn test_discard_and_unknown_ids() {
    let app = common::create_test_app();
    let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/quizzes/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = get(&app, &format!("/api/v1/quizzes/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/quizzes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capacity_limit() {
    let config = Config {
        max_active_assessments: 1,
        ..Config::default()
    };
    let app = common::create_test_app_with(config);
    start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;

    let (status, json) = post(&app, "/api/v1/quizzes", json!({ "question_set_id": QUIZ_SET })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", json);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["assessments"]["active"], 1);
    assert_eq!(health["assessments"]["capacity"], 1);
}

#[tokio::test]
async fn test_completed_quizzes_do_not_block_new_starts() {
    let config = Config {
        max_active_assessments: 2,
        ..Config::default()
    };
    let app = common::create_test_app_with(config);

    for _ in 0..2 {
        let id = start_quiz(&app, json!({ "question_set_id": QUIZ_SET })).await;
        for option in [1, 1, 2] {
            answer(&app, &id, option).await;
            advance(&app, &id).await;
        }
    }

    let (status, json) = post(&app, "/api/v1/quizzes", json!({ "question_set_id": QUIZ_SET })).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["assessments"]["active"], 2);
}
