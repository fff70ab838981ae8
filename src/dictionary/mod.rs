use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

/// Candidate words for level puzzles, in file order
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Load a word list from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let list = Self::from_text(&content);

        tracing::info!("Loaded {} words from {}", list.len(), path.display());

        Ok(list)
    }

    /// One word per line or tab separated entry; blank entries are skipped
    pub fn from_text(text: &str) -> Self {
        let words = text
            .split(['\n', '\r', '\t'])
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
