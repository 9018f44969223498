use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::dedup::dedup;

/// A puzzle author as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub handle: String, // "@handle" format
}

impl Author {
    pub fn new(name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
        }
    }
}

/// One scored candidate tweet.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub text: String,       // Cleaned tweet text
    pub author: String,     // Author display name
    pub source_url: String, // Link to the original post, empty if unknown
    pub score: f64,         // Always > 0 once inside a pool
}

/// Ranked, deduplicated candidates for one author.
///
/// Records are kept in descending score order. The assembler removes a
/// record exactly when it places it in a puzzle round.
#[derive(Debug, Clone)]
pub struct AuthorPool {
    pub author: Author,
    records: Vec<TextRecord>,
}

impl AuthorPool {
    /// Build a pool from scored records: zero scores are dropped, the rest
    /// sorted by score descending (stable, so corpus order breaks ties) and
    /// deduplicated down to at most `limit` records.
    pub fn from_records(author: Author, records: Vec<TextRecord>, limit: usize) -> Self {
        let mut records: Vec<_> = records.into_iter().filter(|r| r.score > 0.0).collect();
        records.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self {
            author,
            records: dedup(records, limit),
        }
    }

    pub fn records(&self) -> &[TextRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove and return the best record whose text has not been used yet.
    pub fn take_unused(&mut self, used: &HashSet<String>) -> Option<TextRecord> {
        let index = self.records.iter().position(|r| !used.contains(&r.text))?;
        Some(self.records.remove(index))
    }
}
