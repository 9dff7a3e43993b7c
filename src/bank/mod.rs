pub mod tokenize;

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::normalize::normalize;

const SENTENCES: &str = include_str!("../../assets/sentences.json");

/// One sentence pair. Immutable for the life of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceItem {
    pub id: String,
    pub source_text: String,
    pub target_text: String,
    pub target_words: Vec<String>,
}

impl SentenceItem {
    pub fn new(id: &str, source_text: &str, target_text: &str) -> Self {
        Self {
            id: id.to_string(),
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
            target_words: tokenize::tokenize(target_text),
        }
    }

    pub fn with_words(mut self, words: &[&str]) -> Self {
        self.target_words = words.iter().map(|w| w.to_string()).collect();
        self
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("sentence bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sentence bank is empty")]
    Empty,
    #[error("duplicate sentence id `{0}`")]
    DuplicateId(String),
    #[error("sentence `{0}` has no target text")]
    EmptyTarget(String),
    #[error("words of sentence `{0}` do not rebuild its target text")]
    WordMismatch(String),
}

#[derive(Deserialize)]
struct RawBank {
    #[serde(default = "default_target_language")]
    target_language: String,
    sentences: Vec<RawSentence>,
}

#[derive(Deserialize)]
struct RawSentence {
    id: String,
    source: String,
    target: String,
    #[serde(default)]
    words: Option<Vec<String>>,
}

fn default_target_language() -> String {
    "en-US".to_string()
}

/// Fixed, ordered list of sentences. There is no mutation API.
#[derive(Clone, Debug)]
pub struct SentenceBank {
    items: Vec<SentenceItem>,
    target_language: String,
}

impl SentenceBank {
    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(SENTENCES)
    }

    fn from_json(json: &str) -> Result<Self, BankError> {
        let raw: RawBank = serde_json::from_str(json)?;
        let items = raw
            .sentences
            .into_iter()
            .map(|s| {
                let target_words = s
                    .words
                    .unwrap_or_else(|| tokenize::tokenize(&s.target));
                SentenceItem {
                    id: s.id,
                    source_text: s.source,
                    target_text: s.target,
                    target_words,
                }
            })
            .collect();
        Self::from_items(items, &raw.target_language)
    }

    pub fn from_items(items: Vec<SentenceItem>, target_language: &str) -> Result<Self, BankError> {
        if items.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(BankError::DuplicateId(item.id.clone()));
            }
            if normalize(&item.target_text).is_empty() {
                return Err(BankError::EmptyTarget(item.id.clone()));
            }
            if normalize(&item.target_words.join(" ")) != normalize(&item.target_text) {
                return Err(BankError::WordMismatch(item.id.clone()));
            }
        }
        Ok(Self {
            items,
            target_language: target_language.to_string(),
        })
    }

    /// Sentence at `index`; indexes past the end wrap around.
    pub fn get(&self, index: usize) -> &SentenceItem {
        &self.items[index % self.items.len()]
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.items.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// BCP-47 tag of the target language, handed to the speech announcer.
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn iter(&self) -> impl Iterator<Item = &SentenceItem> {
        self.items.iter()
    }
}
