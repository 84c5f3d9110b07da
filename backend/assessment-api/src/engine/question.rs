use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::error::AssessmentError;

/// Identifier of a question inside one set. Course content uses both small
/// integers and slugs, so both are accepted and kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        QuestionId::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// The two encodings of the correct answer found in authored content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCorrectAnswer {
    Index(i64),
    Text(String),
}

/// A question record exactly as authored. Unknown fields are rejected so a
/// misspelled key fails loudly instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: QuestionId,
    #[serde(alias = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(alias = "correctIndex", alias = "correct")]
    pub correct_answer: RawCorrectAnswer,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Course module number in multi-module mock exams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<u32>,
}

/// Canonical question. Only constructed through [`Question::from_raw`], which
/// guarantees `correct_index < options.len()` and at least two options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<u32>,
}

impl Question {
    pub fn from_raw(raw: RawQuestion) -> Result<Self, AssessmentError> {
        let RawQuestion {
            id,
            prompt,
            options,
            correct_answer,
            explanation,
            section,
            difficulty,
            topic,
            category,
            module,
        } = raw;

        if prompt.trim().is_empty() {
            return Err(AssessmentError::invalid_question(&id, "prompt is empty"));
        }
        if options.len() < 2 {
            return Err(AssessmentError::invalid_question(
                &id,
                format!("expected at least 2 options, found {}", options.len()),
            ));
        }
        if let Some(blank) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(AssessmentError::invalid_question(
                &id,
                format!("option {} is empty", blank),
            ));
        }

        let correct_index = resolve_correct_answer(&id, &options, &correct_answer)?;

        Ok(Question {
            id,
            prompt,
            options,
            correct_index,
            explanation,
            section,
            difficulty,
            topic,
            category,
            module,
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn module(&self) -> Option<u32> {
        self.module
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = AssessmentError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::from_raw(raw)
    }
}

// Text answers must match exactly one option byte-for-byte.
fn resolve_correct_answer(
    id: &QuestionId,
    options: &[String],
    answer: &RawCorrectAnswer,
) -> Result<usize, AssessmentError> {
    match answer {
        RawCorrectAnswer::Index(index) => usize::try_from(*index)
            .ok()
            .filter(|i| *i < options.len())
            .ok_or_else(|| {
                AssessmentError::invalid_question(
                    id,
                    format!(
                        "correct answer index {} is outside 0..{}",
                        index,
                        options.len()
                    ),
                )
            }),
        RawCorrectAnswer::Text(text) => {
            let mut matches = options
                .iter()
                .enumerate()
                .filter(|(_, option)| option.as_str() == text.as_str())
                .map(|(i, _)| i);

            match (matches.next(), matches.next()) {
                (Some(index), None) => Ok(index),
                (None, _) => Err(AssessmentError::invalid_question(
                    id,
                    format!("correct answer {:?} does not match any option", text),
                )),
                (Some(_), Some(_)) => Err(AssessmentError::invalid_question(
                    id,
                    format!("correct answer {:?} matches more than one option", text),
                )),
            }
        }
    }
}

/// Normalizes a whole set: non-empty, every question valid, ids unique.
pub fn normalize_questions(raw: Vec<RawQuestion>) -> Result<Vec<Question>, AssessmentError> {
    if raw.is_empty() {
        return Err(AssessmentError::invalid_set("no questions supplied"));
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut questions = Vec::with_capacity(raw.len());
    for item in raw {
        if !seen.insert(item.id.clone()) {
            return Err(AssessmentError::invalid_question(
                &item.id,
                "duplicate question id",
            ));
        }
        questions.push(Question::from_raw(item)?);
    }

    Ok(questions)
}
