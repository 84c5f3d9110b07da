//! Assessment engine: question normalization, answer evaluation, the session
//! state machine and the two policies built on top of it (quiz and inline check).
//!
//! Everything in here is synchronous and owns its state; hosts decide where a
//! session lives and how long.

pub mod error;
pub mod inline_check;
pub mod question;
pub mod quiz;
pub mod score;
pub mod session;
pub mod validator;

pub use error::{AssessmentError, SelectionRejection};
pub use inline_check::{InlineCheck, InlineCheckView};
pub use question::{normalize_questions, Difficulty, Question, QuestionId, RawCorrectAnswer, RawQuestion};
pub use quiz::{Quiz, QuizConfig, QuizProgress, QuizSummary, QuizView, ReviewFilter, ReviewItem};
pub use score::{Band, Banding, Score};
pub use session::{
    Advance, AnswerRecord, QuestionView, Reveal, SelectionPolicy, Session, SessionStatus,
};
