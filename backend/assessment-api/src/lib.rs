use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod engine;
pub mod extractors;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Course pages are served from other origins and call this API directly
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1/question-sets", question_set_routes())
        .nest("/api/v1/quizzes", quiz_routes())
        .nest("/api/v1/inline-checks", inline_check_routes())
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn question_set_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::question_sets::list_question_sets))
        .route("/{id}", get(handlers::question_sets::get_question_set))
}

fn quiz_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::quizzes::create_quiz))
        .route(
            "/{id}",
            get(handlers::quizzes::get_quiz).delete(handlers::quizzes::discard),
        )
        .route("/{id}/selection", post(handlers::quizzes::select_option))
        .route("/{id}/commit", post(handlers::quizzes::commit_answer))
        .route("/{id}/advance", post(handlers::quizzes::advance))
        .route("/{id}/restart", post(handlers::quizzes::restart))
        .route("/{id}/review", get(handlers::quizzes::review))
}

fn inline_check_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::inline_checks::create_check))
        .route(
            "/{id}",
            get(handlers::inline_checks::get_check).delete(handlers::inline_checks::discard),
        )
        .route("/{id}/selection", post(handlers::inline_checks::select_option))
        .route("/{id}/commit", post(handlers::inline_checks::commit_answer))
}
