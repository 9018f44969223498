pub mod types;

pub use types::{strip_scores, AssemblyReport, Puzzle, Round, StopReason};

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::pool::AuthorPool;

pub const CANDIDATES_PER_PUZZLE: usize = 4;
pub const ROUNDS_PER_PUZZLE: usize = 3;

/// Builds puzzles from per-author pools.
///
/// Owns the pools, the set of texts already placed in a round, and the
/// random source for one generation run. Nothing is shared between
/// assemblers, so independent runs never interfere.
pub struct Assembler<R: Rng> {
    pools: Vec<AuthorPool>,
    used: HashSet<String>,
    rng: R,
}

impl Assembler<ChaCha8Rng> {
    /// Assembler with the reproducible default generator.
    pub fn seeded(pools: Vec<AuthorPool>, seed: u64) -> Self {
        Self::new(pools, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Assembler<R> {
    /// `pools` order is part of the input: the same pools in the same order
    /// with the same random sequence give the same puzzles.
    pub fn new(pools: Vec<AuthorPool>, rng: R) -> Self {
        Self {
            pools,
            used: HashSet::new(),
            rng,
        }
    }

    pub fn pools(&self) -> &[AuthorPool] {
        &self.pools
    }

    pub fn used_texts(&self) -> &HashSet<String> {
        &self.used
    }

    /// Authors that still have at least one record.
    pub fn live_authors(&self) -> usize {
        self.pools.iter().filter(|p| !p.is_empty()).count()
    }

    /// Attempt puzzles for ids `1..=count`.
    ///
    /// An attempt whose round author has nothing unused left is dropped and
    /// its id skipped. Records already taken for that attempt stay consumed.
    /// Generation stops early once fewer than four authors have records.
    pub fn assemble(&mut self, count: u32) -> AssemblyReport {
        let mut puzzles = Vec::new();
        let mut abandoned = Vec::new();
        let mut stop = StopReason::Completed;

        for puzzle_id in 1..=count {
            let live_authors = self.live_authors();
            if live_authors < CANDIDATES_PER_PUZZLE {
                warn!(
                    "Not enough authors with tweets ({}), stopping at {}",
                    live_authors,
                    puzzle_id - 1
                );
                stop = StopReason::Starved {
                    at: puzzle_id,
                    live_authors,
                };
                break;
            }

            match self.attempt(puzzle_id) {
                Some(puzzle) => puzzles.push(puzzle),
                None => abandoned.push(puzzle_id),
            }
        }

        AssemblyReport {
            requested: count,
            puzzles,
            abandoned,
            stop,
        }
    }

    fn attempt(&mut self, puzzle_id: u32) -> Option<Puzzle> {
        // Exhausted authors stay in the draw; they can still be decoys
        let candidates =
            index::sample(&mut self.rng, self.pools.len(), CANDIDATES_PER_PUZZLE).into_vec();
        let round_authors: Vec<usize> =
            index::sample(&mut self.rng, CANDIDATES_PER_PUZZLE, ROUNDS_PER_PUZZLE)
                .iter()
                .map(|i| candidates[i])
                .collect();

        let mut rounds = Vec::with_capacity(ROUNDS_PER_PUZZLE);
        for author in round_authors {
            let pool = &mut self.pools[author];
            let Some(record) = pool.take_unused(&self.used) else {
                debug!(
                    puzzle_id,
                    author = %pool.author.name,
                    lost = rounds.len(),
                    "No unused tweets left, abandoning puzzle"
                );
                return None;
            };
            self.used.insert(record.text.clone());
            rounds.push(Round::from(record));
        }

        Some(Puzzle {
            id: puzzle_id,
            candidates: candidates.iter().map(|&i| self.pools[i].author.clone()).collect(),
            rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Author, TextRecord};
    use rand::rngs::StdRng;

    fn record(author: &str, text: &str, score: f64) -> TextRecord {
        TextRecord {
            text: text.to_string(),
            author: author.to_string(),
            source_url: String::new(),
            score,
        }
    }

    /// `authors` pools with `per_author` distinct records each.
    fn pools(authors: usize, per_author: usize) -> Vec<AuthorPool> {
        (0..authors)
            .map(|a| {
                let name = format!("Author {}", a);
                let records = (0..per_author)
                    .map(|i| {
                        let text = format!("{} tweet number {}", name, i);
                        record(&name, &text, 100.0 - i as f64)
                    })
                    .collect();
                AuthorPool::from_records(Author::new(&name, format!("@author{}", a)), records, 150)
            })
            .collect()
    }

    fn total_records(pools: &[AuthorPool]) -> usize {
        pools.iter().map(|p| p.len()).sum()
    }

    fn assert_valid(puzzle: &Puzzle) {
        assert_eq!(puzzle.candidates.len(), CANDIDATES_PER_PUZZLE);
        assert_eq!(puzzle.rounds.len(), ROUNDS_PER_PUZZLE);

        let names: HashSet<_> = puzzle.candidates.iter().map(|c| &c.name).collect();
        assert_eq!(names.len(), CANDIDATES_PER_PUZZLE, "duplicate candidate");

        let round_authors: HashSet<_> = puzzle.rounds.iter().map(|r| &r.author).collect();
        assert_eq!(round_authors.len(), ROUNDS_PER_PUZZLE, "repeated round author");
        assert!(round_authors.iter().all(|a| names.contains(a)));
        assert_eq!(puzzle.decoys().count(), 1);
    }

    #[test]
    fn test_structural_validity() {
        let mut assembler = Assembler::seeded(pools(8, 20), 42);
        let report = assembler.assemble(30);

        assert_eq!(report.produced(), 30);
        assert_eq!(report.stop, StopReason::Completed);
        for puzzle in &report.puzzles {
            assert_valid(puzzle);
        }
    }

    #[test]
    fn test_rounds_take_best_remaining_text() {
        let mut assembler = Assembler::seeded(pools(4, 5), 3);
        let report = assembler.assemble(1);

        for round in &report.puzzles[0].rounds {
            assert_eq!(round.text, format!("{} tweet number 0", round.author));
            assert_eq!(round.score, Some(100.0));
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let run = |seed| {
            let mut assembler = Assembler::seeded(pools(6, 15), seed);
            serde_json::to_string(&assembler.assemble(20).puzzles).unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_accepts_any_rng() {
        let mut assembler = Assembler::new(pools(5, 10), StdRng::seed_from_u64(9));
        let report = assembler.assemble(5);
        assert_eq!(report.produced(), 5);
    }

    #[test]
    fn test_global_text_uniqueness_across_authors() {
        // Every author claims the same ten texts
        let shared: Vec<AuthorPool> = (0..6)
            .map(|a| {
                let name = format!("Author {}", a);
                let records = (0..10)
                    .map(|i| record(&name, &format!("the same viral tweet {}", i), 10.0 - i as f64))
                    .collect();
                AuthorPool::from_records(Author::new(&name, format!("@author{}", a)), records, 150)
            })
            .collect();

        let mut assembler = Assembler::seeded(shared, 1);
        let report = assembler.assemble(50);

        let texts: Vec<_> = report
            .puzzles
            .iter()
            .flat_map(|p| p.rounds.iter().map(|r| &r.text))
            .collect();
        let unique: HashSet<_> = texts.iter().collect();
        assert_eq!(texts.len(), unique.len());
        assert!(texts.len() <= 10);
    }

    #[test]
    fn test_end_to_end_four_authors_one_tweet_each() {
        let texts = [
            ("A", "I AM THE GREATEST!!! literally amazing"),
            ("B", "Nobody builds rockets like we do. Nobody!"),
            ("C", "My new jacket is a masterpiece, I love it"),
            ("D", "Drop it like it's hot, one more time, everyone"),
        ];
        let input: Vec<AuthorPool> = texts
            .iter()
            .map(|(name, text)| {
                AuthorPool::from_records(
                    Author::new(*name, format!("@{}", name.to_lowercase())),
                    vec![record(name, text, crate::scoring::score(text))],
                    150,
                )
            })
            .collect();
        assert!(input.iter().all(|p| p.len() == 1));

        let mut assembler = Assembler::seeded(input, 42);
        let report = assembler.assemble(1);

        assert_eq!(report.produced(), 1);
        let puzzle = &report.puzzles[0];
        assert_eq!(puzzle.id, 1);
        assert_valid(puzzle);

        let names: HashSet<_> = puzzle.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"].into_iter().collect::<HashSet<_>>());

        for round in &puzzle.rounds {
            let (_, expected) = texts.iter().find(|(n, _)| *n == round.author).unwrap();
            assert_eq!(round.text, *expected);
        }

        // The decoy keeps its only tweet
        let decoy = puzzle.decoys().next().unwrap();
        let pool = assembler.pools().iter().find(|p| p.author == *decoy).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(assembler.live_authors(), 1);
    }

    #[test]
    fn test_early_termination_when_authors_run_dry() {
        let mut assembler = Assembler::seeded(pools(4, 1), 7);
        let report = assembler.assemble(5);

        assert_eq!(report.produced(), 1);
        assert!(report.produced() < report.requested as usize);
        assert!(report.stopped_early());
        assert_eq!(report.stop, StopReason::Starved { at: 2, live_authors: 1 });
    }

    #[test]
    fn test_too_few_authors_produces_nothing() {
        let mut assembler = Assembler::seeded(pools(3, 10), 7);
        let report = assembler.assemble(3);
        assert_eq!(report.produced(), 0);
        assert_eq!(report.stop, StopReason::Starved { at: 1, live_authors: 3 });
    }

    #[test]
    fn test_zero_count_is_noop() {
        let mut assembler = Assembler::seeded(pools(4, 1), 7);
        let report = assembler.assemble(0);
        assert_eq!(report.produced(), 0);
        assert_eq!(report.stop, StopReason::Completed);
        assert_eq!(total_records(assembler.pools()), 4);
    }

    #[test]
    fn test_abandoned_attempts_are_lossy_and_skip_ids() {
        // Four healthy authors plus one already exhausted. Picking the
        // exhausted one as a round author abandons the attempt; whatever was
        // taken before it in that attempt is not put back.
        let mut found_loss = false;

        for seed in 0..100 {
            let mut input = pools(4, 30);
            input.push(AuthorPool::from_records(Author::new("Spent", "@spent"), Vec::new(), 150));
            let before = total_records(&input);

            let mut assembler = Assembler::seeded(input, seed);
            let report = assembler.assemble(20);
            let consumed = before - total_records(assembler.pools());

            // Every removal is recorded as used, placed in a round or not
            assert_eq!(consumed, assembler.used_texts().len());
            assert!(consumed >= report.produced() * ROUNDS_PER_PUZZLE);
            if consumed > report.produced() * ROUNDS_PER_PUZZLE {
                found_loss = true;
            }

            // Ids ascend and skip exactly the abandoned indices
            let ids: Vec<u32> = report.puzzles.iter().map(|p| p.id).collect();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(ids.len() + report.abandoned.len(), 20);
            assert!(report.abandoned.iter().all(|id| !ids.contains(id)));

            for puzzle in &report.puzzles {
                assert_valid(puzzle);
                assert!(puzzle.rounds.iter().all(|r| r.author != "Spent"));
            }
        }

        assert!(found_loss);
    }

    #[test]
    fn test_exhausted_author_still_drawn_as_decoy() {
        let appears = (0..50).any(|seed| {
            let mut input = pools(4, 30);
            input.push(AuthorPool::from_records(Author::new("Spent", "@spent"), Vec::new(), 150));
            let mut assembler = Assembler::seeded(input, seed);
            assembler
                .assemble(10)
                .puzzles
                .iter()
                .any(|p| p.decoys().any(|d| d.name == "Spent"))
        });
        assert!(appears);
    }
}
