use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::question_set::{QuestionSet, QuestionSetFile, QuestionSetSummary};

/// All question sets available to the host, keyed by set id.
#[derive(Debug, Default)]
pub struct ContentLibrary {
    sets: BTreeMap<String, Arc<QuestionSet>>,
}

impl ContentLibrary {
    /// Loads every `*.json` file in `dir` (non-recursive, sorted by path).
    /// The first invalid file aborts the load.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read content directory {}", dir.display()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut library = ContentLibrary::default();
        for path in &paths {
            let set = load_file(path)?;
            tracing::debug!(
                "Loaded question set {} ({} questions) from {}",
                set.id,
                set.len(),
                path.display()
            );
            library.insert(set)?;
        }

        tracing::info!(
            "Content library ready: {} sets, {} questions from {}",
            library.len(),
            library.question_count(),
            dir.display()
        );

        Ok(library)
    }

    pub fn insert(&mut self, set: QuestionSet) -> Result<()> {
        if self.sets.contains_key(&set.id) {
            bail!("Duplicate question set id: {}", set.id);
        }
        self.sets.insert(set.id.clone(), Arc::new(set));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<QuestionSet>> {
        self.sets.get(id).cloned()
    }

    pub fn summaries(&self) -> Vec<QuestionSetSummary> {
        self.sets.values().map(|set| set.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.sets.values().map(|set| set.len()).sum()
    }
}

/// Parses and normalizes one question set file.
pub fn load_file(path: &Path) -> Result<QuestionSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read question set {}", path.display()))?;

    let file: QuestionSetFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse question set {}", path.display()))?;

    QuestionSet::from_file(file)
        .with_context(|| format!("Invalid question data in {}", path.display()))
}
