use thiserror::Error;

use super::question::QuestionId;
use super::session::SessionStatus;

/// Every way the engine can refuse data or a learner action.
///
/// In-session variants are returned before any mutation happens, so a caller
/// that receives one can keep using the session as if the call never happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("invalid question data ({subject}): {reason}")]
    InvalidQuestionData { subject: String, reason: String },

    #[error("invalid selection {selected}: {reason}")]
    InvalidSelection {
        selected: usize,
        reason: SelectionRejection,
    },

    #[error("no option has been selected for the current question")]
    NoSelectionMade,

    #[error("the current question has not been committed yet")]
    QuestionNotAnswered,

    #[error("cannot {action} while the session is {status}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionRejection {
    #[error("the question only has {option_count} options")]
    OutOfRange { option_count: usize },

    #[error("the answer to this question is already locked in")]
    AnswerLocked,
}

impl AssessmentError {
    pub fn invalid_question(id: &QuestionId, reason: impl Into<String>) -> Self {
        AssessmentError::InvalidQuestionData {
            subject: format!("question {}", id),
            reason: reason.into(),
        }
    }

    pub fn invalid_set(reason: impl Into<String>) -> Self {
        AssessmentError::InvalidQuestionData {
            subject: "question set".to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transition(action: &'static str, status: SessionStatus) -> Self {
        AssessmentError::InvalidTransition { action, status }
    }
}
