use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::engine::{QuizView, RawQuestion, Reveal, ReviewFilter, ReviewItem, Score};

/// Start a quiz either from a loaded question set or from questions supplied
/// by the page itself. Exactly one source must be given.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateQuizRequest {
    pub question_set_id: Option<String>,

    pub questions: Option<Vec<RawQuestion>>,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Quiz id must be between 1 and 100 characters"))]
    pub quiz_id: Option<String>,

    #[validate(range(min = 0.0, max = 1.0, message = "Pass threshold must be within 0..=1"))]
    pub pass_threshold: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "Marginal threshold must be within 0..=1"))]
    pub marginal_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuizResponse {
    pub assessment_id: Uuid,
    pub quiz: QuizView,
}

#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub reveal: Reveal,
    pub running_score: Score,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    pub filter: ReviewFilter,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub filter: ReviewFilter,
    pub items: Vec<ReviewItem>,
}
