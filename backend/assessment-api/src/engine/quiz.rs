use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::AssessmentError;
use super::question::{normalize_questions, Question, QuestionId, RawQuestion};
use super::score::{Band, Banding, Score};
use super::session::{Advance, QuestionView, Reveal, SelectionPolicy, Session, SessionStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizConfig {
    pub title: Option<String>,
    /// Page-local identifier; only separates quizzes rendered side by side.
    pub quiz_id: Option<String>,
    pub banding: Banding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub title: Option<String>,
    pub quiz_id: Option<String>,
    pub score: Score,
    pub percentage: u32,
    pub band: Option<Band>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub title: Option<String>,
    pub quiz_id: Option<String>,
    pub status: SessionStatus,
    pub current_index: usize,
    pub total: usize,
    pub current: Option<QuestionView>,
    pub running_score: Score,
    pub summary: Option<QuizSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizProgress {
    Next(QuestionView),
    Completed(QuizSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFilter {
    #[default]
    All,
    Correct,
    Incorrect,
}

impl ReviewFilter {
    fn accepts(&self, is_correct: bool) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Correct => is_correct,
            ReviewFilter::Incorrect => !is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub index: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected_option_index: usize,
    pub correct_option_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// End-of-section quiz: answers are final once committed and navigation only
/// moves forward.
#[derive(Debug, Clone)]
pub struct Quiz {
    config: QuizConfig,
    session: Session,
}

impl Quiz {
    pub fn new(questions: Arc<[Question]>, config: QuizConfig) -> Result<Self, AssessmentError> {
        Ok(Quiz {
            config,
            session: Session::new(questions, SelectionPolicy::LockAfterCommit)?,
        })
    }

    pub fn from_raw(raw: Vec<RawQuestion>, config: QuizConfig) -> Result<Self, AssessmentError> {
        Quiz::new(Arc::from(normalize_questions(raw)?), config)
    }

    pub fn start(&mut self) -> Result<QuestionView, AssessmentError> {
        self.session.start()?;
        self.current_view()
    }

    pub fn select(&mut self, option_index: usize) -> Result<QuestionView, AssessmentError> {
        self.session.select(option_index)?;
        self.current_view()
    }

    pub fn commit(&mut self) -> Result<Reveal, AssessmentError> {
        self.session.commit()
    }

    pub fn advance(&mut self) -> Result<QuizProgress, AssessmentError> {
        match self.session.advance()? {
            Advance::Next { .. } => self.current_view().map(QuizProgress::Next),
            Advance::Completed(_) => self
                .summary()
                .map(QuizProgress::Completed)
                .ok_or(AssessmentError::QuestionNotAnswered),
        }
    }

    /// Clears every commit and returns to `NotStarted`; ordering is kept.
    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn running_score(&self) -> Score {
        self.session.score()
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        if self.session.status() != SessionStatus::Completed {
            return None;
        }

        let score = self.session.score();
        Some(QuizSummary {
            title: self.config.title.clone(),
            quiz_id: self.config.quiz_id.clone(),
            score,
            percentage: score.percentage(),
            band: self.config.banding.classify(&score),
        })
    }

    pub fn view(&self) -> QuizView {
        QuizView {
            title: self.config.title.clone(),
            quiz_id: self.config.quiz_id.clone(),
            status: self.session.status(),
            current_index: self.session.current_index(),
            total: self.session.len(),
            current: self.session.current_view(),
            running_score: self.session.score(),
            summary: self.summary(),
        }
    }

    /// Per-question breakdown; only available once the quiz is completed.
    pub fn review(&self, filter: ReviewFilter) -> Result<Vec<ReviewItem>, AssessmentError> {
        if self.session.status() != SessionStatus::Completed {
            return Err(AssessmentError::InvalidTransition {
                action: "review",
                status: self.session.status(),
            });
        }

        let items = (0..self.session.len())
            .filter_map(|index| {
                let question = &self.session.questions()[index];
                let reveal = self.session.reveal_at(index)?;
                Some(ReviewItem {
                    index,
                    question_id: reveal.question_id,
                    prompt: question.prompt().to_string(),
                    options: question.options().to_vec(),
                    selected_option_index: reveal.selected_option_index,
                    correct_option_index: reveal.correct_option_index,
                    is_correct: reveal.is_correct,
                    explanation: reveal.explanation,
                })
            })
            .filter(|item| filter.accepts(item.is_correct))
            .collect();

        Ok(items)
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn current_view(&self) -> Result<QuestionView, AssessmentError> {
        self.session
            .current_view()
            .ok_or(AssessmentError::InvalidTransition {
                action: "view",
                status: self.session.status(),
            })
    }
}
