pub mod engine;
pub mod rules;

pub use engine::{evaluate, evaluate_with, score, RuleContribution, ScoreResult};
pub use rules::{Effect, Rule, Text, RULES};
