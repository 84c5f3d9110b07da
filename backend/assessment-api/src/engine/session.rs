use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::error::{AssessmentError, SelectionRejection};
use super::question::{normalize_questions, Difficulty, Question, QuestionId, RawQuestion};
use super::score::Score;
use super::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::NotStarted => "not_started",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `select()` is still accepted once the current question is committed
/// and the session has not yet advanced past it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Committed answers are final (quiz, inline check).
    #[default]
    LockAfterCommit,
    /// Selecting again discards the commit and reopens the current question.
    /// Only reachable in multi-question sessions: a single-question session
    /// completes on advance, and a completed session only accepts `restart()`.
    ReopenAfterCommit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Commit {
    is_correct: bool,
    committed_at: u64,
}

/// One learner response. `is_correct` only exists once the record is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    question_id: QuestionId,
    selected_option_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", flatten)]
    commit: Option<Commit>,
}

impl AnswerRecord {
    fn reached(question_id: QuestionId) -> Self {
        AnswerRecord {
            question_id,
            selected_option_index: None,
            commit: None,
        }
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        self.selected_option_index
    }

    pub fn is_committed(&self) -> bool {
        self.commit.is_some()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.commit.map(|c| c.is_correct)
    }

    pub fn committed_at(&self) -> Option<u64> {
        self.commit.map(|c| c.committed_at)
    }
}

/// Feedback revealed when a question is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    pub question_id: QuestionId,
    pub selected_option_index: usize,
    pub correct_option_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Read-only view of one reached question for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub selected_option_index: Option<usize>,
    pub committed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Completed(Score),
}

/// State of one attempt at an ordered list of questions.
///
/// `answers` holds one record per reached question, in traversal order, so
/// while in progress `answers.len() == current_index + 1` and the last record
/// belongs to the current question.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Arc<[Question]>,
    answers: Vec<AnswerRecord>,
    current_index: usize,
    status: SessionStatus,
    policy: SelectionPolicy,
    clock: u64,
}

impl Session {
    pub fn new(questions: Arc<[Question]>, policy: SelectionPolicy) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::invalid_set("no questions supplied"));
        }

        Ok(Session {
            answers: Vec::with_capacity(questions.len()),
            questions,
            current_index: 0,
            status: SessionStatus::NotStarted,
            policy,
            clock: 0,
        })
    }

    pub fn from_raw(raw: Vec<RawQuestion>, policy: SelectionPolicy) -> Result<Self, AssessmentError> {
        Session::new(Arc::from(normalize_questions(raw)?), policy)
    }

    pub fn start(&mut self) -> Result<(), AssessmentError> {
        if self.status != SessionStatus::NotStarted {
            return Err(AssessmentError::transition("start", self.status));
        }

        self.answers.clear();
        self.current_index = 0;
        self.answers
            .push(AnswerRecord::reached(self.questions[0].id().clone()));
        self.status = SessionStatus::InProgress;
        Ok(())
    }

    pub fn select(&mut self, option_index: usize) -> Result<(), AssessmentError> {
        self.require_in_progress("select")?;

        let question = &self.questions[self.current_index];
        validator::check_selection(question, option_index)?;

        let policy = self.policy;
        let record = self.current_record_mut()?;
        if record.is_committed() && policy == SelectionPolicy::LockAfterCommit {
            return Err(AssessmentError::InvalidSelection {
                selected: option_index,
                reason: SelectionRejection::AnswerLocked,
            });
        }

        record.commit = None;
        record.selected_option_index = Some(option_index);
        Ok(())
    }

    /// Locks in the provisional selection. Committing an already committed
    /// question returns the recorded outcome unchanged.
    pub fn commit(&mut self) -> Result<Reveal, AssessmentError> {
        self.require_in_progress("commit")?;

        let index = self.current_index;
        let record = self.current_record_mut()?;
        if record.is_committed() {
            return self.reveal_at(index).ok_or(AssessmentError::QuestionNotAnswered);
        }
        let selected = record
            .selected_option_index
            .ok_or(AssessmentError::NoSelectionMade)?;

        let is_correct = validator::evaluate(&self.questions[index], selected)?;
        self.clock += 1;
        let committed_at = self.clock;
        self.current_record_mut()?.commit = Some(Commit {
            is_correct,
            committed_at,
        });

        self.reveal_at(index).ok_or(AssessmentError::QuestionNotAnswered)
    }

    pub fn advance(&mut self) -> Result<Advance, AssessmentError> {
        self.require_in_progress("advance")?;

        if !self.current_record_mut()?.is_committed() {
            return Err(AssessmentError::QuestionNotAnswered);
        }

        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.status = SessionStatus::Completed;
            return Ok(Advance::Completed(self.score()));
        }

        self.answers.push(AnswerRecord::reached(
            self.questions[self.current_index].id().clone(),
        ));
        Ok(Advance::Next {
            index: self.current_index,
        })
    }

    /// Back to `NotStarted` with every record dropped; the questions are kept.
    pub fn restart(&mut self) {
        self.answers.clear();
        self.current_index = 0;
        self.status = SessionStatus::NotStarted;
        self.clock = 0;
    }

    pub fn score(&self) -> Score {
        let mut score = Score {
            correct: 0,
            answered: 0,
            total: self.questions.len(),
        };
        for correct in self.answers.iter().filter_map(AnswerRecord::is_correct) {
            score.answered += 1;
            if correct {
                score.correct += 1;
            }
        }
        score
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &Arc<[Question]> {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| a.question_id() == question_id)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            SessionStatus::InProgress => self.questions.get(self.current_index),
            _ => None,
        }
    }

    pub fn current_view(&self) -> Option<QuestionView> {
        match self.status {
            SessionStatus::InProgress => self.question_view(self.current_index),
            _ => None,
        }
    }

    /// View of a reached question; `None` for questions not reached yet.
    pub fn question_view(&self, index: usize) -> Option<QuestionView> {
        let question = self.questions.get(index)?;
        let record = self.answers.get(index)?;

        Some(QuestionView {
            index,
            total: self.questions.len(),
            question_id: question.id().clone(),
            prompt: question.prompt().to_string(),
            options: question.options().to_vec(),
            section: question.section().map(str::to_string),
            difficulty: question.difficulty(),
            topic: question.topic().map(str::to_string),
            category: question.category().map(str::to_string),
            selected_option_index: record.selected_option_index,
            committed: record.is_committed(),
            reveal: self.reveal_at(index),
        })
    }

    pub fn reveal_at(&self, index: usize) -> Option<Reveal> {
        let question = self.questions.get(index)?;
        let record = self.answers.get(index)?;
        let commit = record.commit?;

        Some(Reveal {
            question_id: question.id().clone(),
            selected_option_index: record.selected_option_index?,
            correct_option_index: question.correct_index(),
            is_correct: commit.is_correct,
            explanation: question.explanation().to_string(),
        })
    }

    fn require_in_progress(&self, action: &'static str) -> Result<(), AssessmentError> {
        if self.status != SessionStatus::InProgress {
            return Err(AssessmentError::transition(action, self.status));
        }
        Ok(())
    }

    fn current_record_mut(&mut self) -> Result<&mut AnswerRecord, AssessmentError> {
        let status = self.status;
        self.answers
            .get_mut(self.current_index)
            .ok_or(AssessmentError::InvalidTransition {
                action: "answer",
                status,
            })
    }
}
