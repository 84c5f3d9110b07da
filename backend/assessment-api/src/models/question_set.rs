use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::engine::{normalize_questions, AssessmentError, Difficulty, Question, QuestionId, RawQuestion};

/// On-disk shape of a question set (one JSON file per course section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionSetFile {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<RawQuestion>,
}

/// A normalized question set shared by every quiz started from it.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    questions: Arc<[Question]>,
}

impl QuestionSet {
    pub fn from_file(file: QuestionSetFile) -> Result<Self, AssessmentError> {
        if file.id.trim().is_empty() {
            return Err(AssessmentError::invalid_set("question set id is empty"));
        }
        if file.title.trim().is_empty() {
            return Err(AssessmentError::invalid_set(format!(
                "question set {} has an empty title",
                file.id
            )));
        }

        let questions = normalize_questions(file.questions)?;

        Ok(QuestionSet {
            id: file.id,
            title: file.title,
            description: file.description,
            questions: Arc::from(questions),
        })
    }

    pub fn questions(&self) -> &Arc<[Question]> {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn summary(&self) -> QuestionSetSummary {
        let mut difficulty = DifficultyBreakdown::default();
        let mut sections = BTreeMap::new();
        let mut categories = BTreeMap::new();
        let mut modules = BTreeSet::new();

        for question in self.questions.iter() {
            match question.difficulty() {
                Some(Difficulty::Basic) => difficulty.basic += 1,
                Some(Difficulty::Intermediate) => difficulty.intermediate += 1,
                Some(Difficulty::Advanced) => difficulty.advanced += 1,
                None => difficulty.unspecified += 1,
            }
            if let Some(section) = question.section() {
                *sections.entry(section.to_string()).or_insert(0) += 1;
            }
            if let Some(category) = question.category() {
                *categories.entry(category.to_string()).or_insert(0) += 1;
            }
            if let Some(module) = question.module() {
                modules.insert(module);
            }
        }

        QuestionSetSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            question_count: self.questions.len(),
            sections,
            categories,
            modules: modules.into_iter().collect(),
            difficulty,
        }
    }
}

/// Public description of a set. Never includes answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSetSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_count: usize,
    /// Question count per section label.
    pub sections: BTreeMap<String, usize>,
    /// Question count per category label.
    pub categories: BTreeMap<String, usize>,
    pub modules: Vec<u32>,
    pub difficulty: DifficultyBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub basic: usize,
    pub intermediate: usize,
    pub advanced: usize,
    pub unspecified: usize,
}
