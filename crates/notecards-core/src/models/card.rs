//! Flashcard data model and id generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique identifier of a card within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number of a generated id (`<timestamp>-<sequence>`).
    fn sequence(&self) -> Option<u64> {
        let (_, seq) = self.0.rsplit_once('-')?;
        seq.parse().ok()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Card identifier.
    pub id: CardId,

    /// Question side (never empty).
    pub question: String,

    /// Answer side (never empty).
    pub answer: String,
}

impl Flashcard {
    /// Build a card from raw text, trimming both sides.
    ///
    /// Returns `None` when either side is empty after trimming.
    pub fn new(id: CardId, question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();

        if question.is_empty() || answer.is_empty() {
            return None;
        }

        Some(Self {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Generates card ids that are unique for the lifetime of a deck.
///
/// Every batch shares one millisecond timestamp; uniqueness comes from the
/// sequence counter, which only ever moves forward.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator starting at sequence zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new batch stamped with the current time.
    pub fn batch(&self) -> IdBatch<'_> {
        IdBatch {
            generator: self,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Move the counter past every sequence number already used by `ids`.
    pub fn resume_after<'a>(&self, ids: impl IntoIterator<Item = &'a CardId>) {
        if let Some(max) = ids.into_iter().filter_map(CardId::sequence).max() {
            self.next.fetch_max(max.saturating_add(1), Ordering::Relaxed);
        }
    }

    fn next_sequence(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Ids drawn for a single synthesis or recognition batch.
#[derive(Debug)]
pub struct IdBatch<'a> {
    generator: &'a IdGenerator,
    timestamp: i64,
}

impl IdBatch<'_> {
    /// Allocate the next id in this batch.
    pub fn next_id(&self) -> CardId {
        CardId(format!("{}-{}", self.timestamp, self.generator.next_sequence()))
    }
}
