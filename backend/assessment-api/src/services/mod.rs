use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::engine::AssessmentError;

pub mod assessment_registry;
pub mod content_service;
pub mod inline_check_service;
pub mod quiz_service;

use assessment_registry::AssessmentRegistry;
use content_service::ContentLibrary;

pub struct AppState {
    pub config: Config,
    pub content: ContentLibrary,
    pub assessments: AssessmentRegistry,
}

impl AppState {
    /// Loads every question set from the configured content directory.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let content = ContentLibrary::load_dir(&config.content_dir)?;
        Ok(Self::with_content(config, content))
    }

    pub fn with_content(config: Config, content: ContentLibrary) -> Self {
        let assessments = AssessmentRegistry::new(
            config.max_active_assessments,
            Duration::from_secs(config.idle_timeout_secs),
        );
        Self {
            config,
            content,
            assessments,
        }
    }
}

/// Failures surfaced by the host services, on top of the engine's own.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("too many active assessments (limit {0})")]
    CapacityExceeded(usize),
}
