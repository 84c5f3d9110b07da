use serde::Serialize;
use std::sync::Arc;

use super::error::AssessmentError;
use super::question::{Question, RawQuestion};
use super::session::{QuestionView, Reveal, SelectionPolicy, Session, SessionStatus};
use super::validator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineCheckView {
    pub status: SessionStatus,
    pub question: QuestionView,
}

/// Single-question knowledge check. Committing reveals and completes in one
/// step; selecting again afterwards restarts the session for a fresh attempt.
#[derive(Debug, Clone)]
pub struct InlineCheck {
    session: Session,
}

impl InlineCheck {
    pub fn new(question: Question) -> Result<Self, AssessmentError> {
        let questions: Arc<[Question]> = Arc::from(vec![question]);
        let mut session = Session::new(questions, SelectionPolicy::LockAfterCommit)?;
        session.start()?;
        Ok(InlineCheck { session })
    }

    pub fn from_raw(raw: RawQuestion) -> Result<Self, AssessmentError> {
        InlineCheck::new(Question::from_raw(raw)?)
    }

    pub fn question(&self) -> &Question {
        &self.session.questions()[0]
    }

    pub fn select(&mut self, option_index: usize) -> Result<InlineCheckView, AssessmentError> {
        if self.session.status() == SessionStatus::Completed {
            validator::check_selection(self.question(), option_index)?;
            self.reset()?;
        }
        self.session.select(option_index)?;
        self.view()
    }

    pub fn commit(&mut self) -> Result<Reveal, AssessmentError> {
        if self.session.status() == SessionStatus::Completed {
            return self
                .session
                .reveal_at(0)
                .ok_or(AssessmentError::QuestionNotAnswered);
        }

        let reveal = self.session.commit()?;
        self.session.advance()?;
        Ok(reveal)
    }

    pub fn reset(&mut self) -> Result<(), AssessmentError> {
        self.session.restart();
        self.session.start()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.session.answers().first().and_then(|a| a.is_correct())
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn view(&self) -> Result<InlineCheckView, AssessmentError> {
        let question = self
            .session
            .question_view(0)
            .ok_or(AssessmentError::InvalidTransition {
                action: "view",
                status: self.session.status(),
            })?;

        Ok(InlineCheckView {
            status: self.session.status(),
            question,
        })
    }
}
