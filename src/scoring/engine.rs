use super::rules::{Rule, Text, RULES};

#[derive(Debug, Clone, PartialEq)]
pub struct RuleContribution {
    pub label: &'static str, // e.g. "caps words", "link residue"
    pub hits: usize,         // Raw measurement before the effect is applied
    pub delta: f64,          // Signed, already capped
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// Label of the hard reject that zeroed the score, if any
    pub rejected_by: Option<&'static str>,
    pub contributions: Vec<RuleContribution>,
}

impl ScoreResult {
    pub fn is_rejected(&self) -> bool {
        self.score == 0.0
    }
}

/// Suitability of a cleaned tweet as puzzle material. 0 means unusable.
pub fn score(text: &str) -> f64 {
    evaluate(text).score
}

/// Score a tweet against the built-in table and keep the per-rule breakdown.
pub fn evaluate(text: &str) -> ScoreResult {
    evaluate_with(text, RULES)
}

/// Score a tweet against an arbitrary rule table.
///
/// Every reject rule is checked before any additive rule, whatever its
/// position in `rules`. The first reject that hits ends evaluation.
pub fn evaluate_with(text: &str, rules: &[Rule]) -> ScoreResult {
    let text = Text::new(text);

    if let Some(rule) = rules
        .iter()
        .filter(|r| r.effect.is_reject())
        .find(|r| (r.measure)(&text) > 0)
    {
        return ScoreResult {
            score: 0.0,
            rejected_by: Some(rule.label),
            contributions: Vec::new(),
        };
    }

    let mut score = 0.0;
    let mut contributions = Vec::new();
    for rule in rules.iter().filter(|r| !r.effect.is_reject()) {
        let hits = (rule.measure)(&text);
        if hits == 0 {
            continue;
        }
        let delta = rule.effect.contribution(hits);
        score += delta;
        contributions.push(RuleContribution {
            label: rule.label,
            hits,
            delta,
        });
    }

    // Floor at zero
    ScoreResult {
        score: f64::max(score, 0.0),
        rejected_by: None,
        contributions,
    }
}
