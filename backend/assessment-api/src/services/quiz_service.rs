use std::sync::Arc;
use uuid::Uuid;

use super::{AppState, ServiceError};
use crate::engine::{
    normalize_questions, AssessmentError, Banding, Question, Quiz, QuizConfig, QuizView,
    ReviewFilter,
};
use crate::models::quiz::{CommitResponse, CreateQuizRequest, CreateQuizResponse, ReviewResponse};

pub struct QuizService<'a> {
    state: &'a AppState,
}

impl<'a> QuizService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_quiz(&self, req: CreateQuizRequest) -> Result<CreateQuizResponse, ServiceError> {
        let CreateQuizRequest {
            question_set_id,
            questions,
            title,
            quiz_id,
            pass_threshold,
            marginal_threshold,
        } = req;

        let (questions, set_title): (Arc<[Question]>, Option<String>) =
            match (question_set_id, questions) {
                (Some(set_id), None) => {
                    let set = self
                        .state
                        .content
                        .get(&set_id)
                        .ok_or_else(|| ServiceError::NotFound(format!("Question set {}", set_id)))?;
                    (set.questions().clone(), Some(set.title.clone()))
                }
                (None, Some(raw)) => (Arc::from(normalize_questions(raw)?), None),
                _ => {
                    return Err(ServiceError::BadRequest(
                        "Exactly one of question_set_id or questions must be supplied".to_string(),
                    ))
                }
            };

        let banding = if pass_threshold.is_none() && marginal_threshold.is_none() {
            self.state.config.banding()
        } else {
            Banding::new(pass_threshold, marginal_threshold).map_err(ServiceError::BadRequest)?
        };

        let mut quiz = Quiz::new(
            questions,
            QuizConfig {
                title: title.or(set_title),
                quiz_id,
                banding,
            },
        )?;
        quiz.start()?;
        let view = quiz.view();

        let assessment_id = self.state.assessments.insert_quiz(quiz).await?;
        tracing::info!(
            "Quiz started: id={}, questions={}, title={:?}",
            assessment_id,
            view.total,
            view.title
        );

        Ok(CreateQuizResponse {
            assessment_id,
            quiz: view,
        })
    }

    pub async fn get_quiz(&self, id: Uuid) -> Result<QuizView, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let quiz = quiz.lock().await;
        Ok(quiz.view())
    }

    pub async fn select(&self, id: Uuid, option_index: usize) -> Result<QuizView, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let mut quiz = quiz.lock().await;
        quiz.select(option_index).map_err(rejected(id, "select"))?;
        Ok(quiz.view())
    }

    pub async fn commit(&self, id: Uuid) -> Result<CommitResponse, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let mut quiz = quiz.lock().await;
        let reveal = quiz.commit().map_err(rejected(id, "commit"))?;
        tracing::debug!(
            "Quiz {} committed question {}: correct={}",
            id,
            reveal.question_id,
            reveal.is_correct
        );

        Ok(CommitResponse {
            reveal,
            running_score: quiz.running_score(),
        })
    }

    pub async fn advance(&self, id: Uuid) -> Result<QuizView, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let mut quiz = quiz.lock().await;
        quiz.advance().map_err(rejected(id, "advance"))?;

        let view = quiz.view();
        if let Some(summary) = &view.summary {
            tracing::info!(
                "Quiz completed: id={}, score={}/{}, band={:?}",
                id,
                summary.score.correct,
                summary.score.total,
                summary.band
            );
        }
        Ok(view)
    }

    /// Restarts and immediately starts again on the first question.
    pub async fn restart(&self, id: Uuid) -> Result<QuizView, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let mut quiz = quiz.lock().await;
        quiz.restart();
        quiz.start()?;
        tracing::info!("Quiz restarted: id={}", id);
        Ok(quiz.view())
    }

    pub async fn review(&self, id: Uuid, filter: ReviewFilter) -> Result<ReviewResponse, ServiceError> {
        let quiz = self.state.assessments.quiz(id).await?;
        let quiz = quiz.lock().await;
        let items = quiz.review(filter).map_err(rejected(id, "review"))?;
        Ok(ReviewResponse { filter, items })
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), ServiceError> {
        self.state.assessments.remove_quiz(id).await?;
        tracing::info!("Quiz discarded: id={}", id);
        Ok(())
    }
}

pub(crate) fn rejected(id: Uuid, action: &'static str) -> impl FnOnce(AssessmentError) -> ServiceError {
    move |err| {
        tracing::warn!("Rejected {} on assessment {}: {}", action, id, err);
        ServiceError::Assessment(err)
    }
}
