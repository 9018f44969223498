use serde::{Deserialize, Serialize};

use crate::pool::{Author, TextRecord};

/// One quoted tweet and the author who wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub text: String,
    pub author: String, // Always one of the puzzle's candidates
    pub source_url: String,
    /// Selection score; internal only, stripped before the puzzles are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<TextRecord> for Round {
    fn from(record: TextRecord) -> Self {
        Self {
            text: record.text,
            author: record.author,
            source_url: record.source_url,
            score: Some(record.score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    pub candidates: Vec<Author>, // In draw order
    pub rounds: Vec<Round>,
}

impl Puzzle {
    /// Candidates that answer none of the rounds.
    pub fn decoys(&self) -> impl Iterator<Item = &Author> {
        self.candidates
            .iter()
            .filter(|c| !self.rounds.iter().any(|r| r.author == c.name))
    }
}

/// Drop internal selection scores from every round.
pub fn strip_scores(puzzles: &mut [Puzzle]) {
    for round in puzzles.iter_mut().flat_map(|p| p.rounds.iter_mut()) {
        round.score = None;
    }
}

/// Why the assembler stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every requested index was attempted
    Completed,
    /// Fewer than four authors had anything left when index `at` came up
    Starved { at: u32, live_authors: usize },
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub requested: u32,
    pub puzzles: Vec<Puzzle>,
    /// Indices whose attempt ran out of tweets for a round author
    pub abandoned: Vec<u32>,
    pub stop: StopReason,
}

impl AssemblyReport {
    pub fn produced(&self) -> usize {
        self.puzzles.len()
    }

    pub fn stopped_early(&self) -> bool {
        matches!(self.stop, StopReason::Starved { .. })
    }
}
