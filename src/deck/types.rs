//! Core data types and error definitions for the flashcard deck.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading the flashcard data file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file could not be read from disk.
    #[error("failed to read flashcard data from {}: {source}", .path.display())]
    Read {
        /// Location we attempted to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The data file was readable but did not contain a valid document.
    #[error("failed to parse flashcard data in {}: {source}", .path.display())]
    Parse {
        /// Location of the malformed file.
        path: PathBuf,
        /// Underlying JSON error, including line and column.
        #[source]
        source: serde_json::Error,
    },
}

/// The whole deck as loaded at startup: document metadata plus the ordered cards.
///
/// Constructed once before the HTTP listener binds and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDocument {
    /// Descriptive, document-level data.
    #[serde(default)]
    pub metadata: Metadata,
    /// Cards in file order.
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl FlashcardDocument {
    /// The fallback served when the data file cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A single question/answer record, kept exactly as it appeared in the data file.
///
/// Fields are read through accessors rather than validated at load time: a card with a
/// missing or oddly typed field still loads, is served back unchanged, and simply never
/// matches a filter on that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flashcard(Value);

impl Flashcard {
    /// Numeric identifier, when `id` is an integral JSON number (`3` and `3.0` both count).
    pub fn id(&self) -> Option<i64> {
        let id = self.0.get("id")?;
        id.as_i64().or_else(|| {
            id.as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
                .map(|n| n as i64)
        })
    }

    /// Prompt shown on the front of the card.
    pub fn question(&self) -> Option<&str> {
        self.text("question")
    }

    /// Expected answer on the back of the card.
    pub fn answer(&self) -> Option<&str> {
        self.text("answer")
    }

    /// Category name, matched exactly by the category filter.
    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    /// Difficulty label, matched exactly by the difficulty filter.
    pub fn difficulty(&self) -> Option<&str> {
        self.text("difficulty")
    }

    /// String entries of the `tags` array; anything else is skipped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Raw value of any field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for Flashcard {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Free-form metadata accompanying the deck, served back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Value);

impl Metadata {
    /// The `categories` entry as stored, or an empty array when it is absent or `null`.
    pub fn categories(&self) -> Value {
        self.0
            .get("categories")
            .filter(|categories| !categories.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Raw value of any metadata field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
