use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Words that signal strong sentiment or superlatives.
pub const STRONG_WORDS: &[&str] = &[
    "best", "worst", "greatest", "terrible", "amazing", "tremendous", "huge", "stupid", "loser",
    "hater", "genius", "god", "perfect", "never", "always", "everyone", "nobody", "billion",
    "million", "love", "hate", "fake", "sad", "incredible", "fantastic", "disaster", "pathetic",
    "weak", "strong", "winning", "losing", "smart", "dumb", "crazy", "insane", "literally",
];

/// Words and phrases that mark a tweet as an ad or a plug. Matched whole-word,
/// case-insensitively.
pub const PROMO_WORDS: &[&str] = &[
    "sale",
    "shop",
    "buy",
    "discount",
    "coupon",
    "promo",
    "giveaway",
    "merch",
    "available now",
    "link in bio",
    "out now",
    "pre-order",
    "preorder",
    "stream",
    "tune in",
    "watch now",
    "download",
    "subscribe",
];

static CAPS_WORD: OnceLock<Regex> = OnceLock::new();
static SELF_REF: OnceLock<Regex> = OnceLock::new();
static STRONG: OnceLock<Regex> = OnceLock::new();
static PROMO: OnceLock<Regex> = OnceLock::new();
static MENTION_LED: OnceLock<Regex> = OnceLock::new();
static MENTION: OnceLock<Regex> = OnceLock::new();
static HASHTAG: OnceLock<Regex> = OnceLock::new();

fn caps_word() -> &'static Regex {
    CAPS_WORD.get_or_init(|| Regex::new(r"\b[A-Z]{2,}\b").expect("valid regex"))
}

fn self_ref() -> &'static Regex {
    SELF_REF.get_or_init(|| Regex::new(r"(?i)\b(?:I|my|me|myself)\b").expect("valid regex"))
}

fn strong() -> &'static Regex {
    STRONG.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b(?:{})\b", STRONG_WORDS.join("|"))).expect("valid regex")
    })
}

fn promo() -> &'static Regex {
    PROMO.get_or_init(|| {
        let words: Vec<String> = PROMO_WORDS.iter().map(|w| regex::escape(w)).collect();
        Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).expect("valid regex")
    })
}

fn mention_led() -> &'static Regex {
    MENTION_LED.get_or_init(|| Regex::new(r#"^"?\s*@"#).expect("valid regex"))
}

fn mention() -> &'static Regex {
    MENTION.get_or_init(|| Regex::new(r"@\w+").expect("valid regex"))
}

fn hashtag() -> &'static Regex {
    HASHTAG.get_or_init(|| Regex::new(r"#\w+").expect("valid regex"))
}

/// A tweet under evaluation, with the measurements several rules share.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a> {
    pub raw: &'a str,
    /// Length in characters, not bytes
    pub chars: usize,
    /// Whitespace-delimited tokens, never less than 1
    pub tokens: usize,
}

impl<'a> Text<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            chars: raw.chars().count(),
            tokens: raw.split_whitespace().count().max(1),
        }
    }

    /// Number of distinct promotional keywords, "pre-order" and "preorder" counted as one.
    pub fn promo_keywords(&self) -> usize {
        promo()
            .find_iter(self.raw)
            .map(|m| m.as_str().to_lowercase().replace('-', ""))
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn hashtags(&self) -> usize {
        hashtag().find_iter(self.raw).count()
    }

    fn ratio(&self, hits: usize) -> f64 {
        hits as f64 / self.tokens as f64
    }
}

/// What a rule does to the score once it hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Any hit forces the score to zero and skips every other rule
    Reject,
    /// Applied once, regardless of hit count
    Flat(f64),
    /// `weight` per hit, clamped to `cap` when present
    PerHit { weight: f64, cap: Option<f64> },
}

impl Effect {
    /// Score delta for `hits` matches. Rejects contribute nothing here;
    /// the engine handles them before any delta is summed.
    pub fn contribution(&self, hits: usize) -> f64 {
        if hits == 0 {
            return 0.0;
        }
        match self {
            Effect::Reject => 0.0,
            Effect::Flat(n) => *n,
            Effect::PerHit { weight, cap } => {
                let raw = weight * hits as f64;
                match cap {
                    Some(cap) => raw.min(*cap),
                    None => raw,
                }
            }
        }
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Effect::Reject)
    }
}

/// One row of the scoring table: a measurement and what its hits are worth.
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    /// Hit count; 0 means the rule does not apply
    pub measure: fn(&Text) -> usize,
    pub effect: Effect,
}

fn flag(cond: bool) -> usize {
    usize::from(cond)
}

fn too_short(t: &Text) -> usize {
    flag(t.chars < 20)
}

fn too_long(t: &Text) -> usize {
    flag(t.chars > 200)
}

fn retweet(t: &Text) -> usize {
    flag(t.raw.starts_with("RT "))
}

fn leading_mention(t: &Text) -> usize {
    flag(mention_led().is_match(t.raw))
}

fn quoted_mention(t: &Text) -> usize {
    flag(t.raw.starts_with('"') && t.raw.chars().take(30).any(|c| c == '@'))
}

fn dot_mention(t: &Text) -> usize {
    flag(t.raw.starts_with(".@"))
}

fn promo_flood(t: &Text) -> usize {
    flag(t.promo_keywords() >= 2)
}

fn mention_heavy(t: &Text) -> usize {
    flag(t.ratio(mention().find_iter(t.raw).count()) > 0.3)
}

fn hashtag_heavy(t: &Text) -> usize {
    flag(t.ratio(t.hashtags()) > 0.3)
}

fn caps_words(t: &Text) -> usize {
    caps_word().find_iter(t.raw).count()
}

fn exclamations(t: &Text) -> usize {
    t.raw.matches('!').count()
}

fn questions(t: &Text) -> usize {
    t.raw.matches('?').count()
}

fn self_references(t: &Text) -> usize {
    self_ref().find_iter(t.raw).count()
}

fn strong_words(t: &Text) -> usize {
    strong().find_iter(t.raw).count()
}

fn sweet_spot(t: &Text) -> usize {
    flag((40..=140).contains(&t.chars))
}

fn near_sweet_spot(t: &Text) -> usize {
    flag(!(40..=140).contains(&t.chars) && (30..=180).contains(&t.chars))
}

fn thanks(t: &Text) -> usize {
    flag(t.raw.starts_with("Thank"))
}

fn link_residue(t: &Text) -> usize {
    flag(t.raw.to_lowercase().contains("http"))
}

fn promo_keywords(t: &Text) -> usize {
    t.promo_keywords()
}

fn hashtag_pile(t: &Text) -> usize {
    match t.hashtags() {
        n if n > 2 => n,
        _ => 0,
    }
}

/// The scoring table, in evaluation order.
pub static RULES: &[Rule] = &[
    Rule {
        label: "too short",
        measure: too_short,
        effect: Effect::Reject,
    },
    Rule {
        label: "too long",
        measure: too_long,
        effect: Effect::Reject,
    },
    Rule {
        label: "retweet",
        measure: retweet,
        effect: Effect::Reject,
    },
    Rule {
        label: "leading mention",
        measure: leading_mention,
        effect: Effect::Reject,
    },
    Rule {
        label: "quoted mention",
        measure: quoted_mention,
        effect: Effect::Reject,
    },
    Rule {
        label: "dot mention",
        measure: dot_mention,
        effect: Effect::Reject,
    },
    Rule {
        label: "promo flood",
        measure: promo_flood,
        effect: Effect::Reject,
    },
    Rule {
        label: "mention heavy",
        measure: mention_heavy,
        effect: Effect::Reject,
    },
    Rule {
        label: "hashtag heavy",
        measure: hashtag_heavy,
        effect: Effect::Reject,
    },
    Rule {
        label: "caps words",
        measure: caps_words,
        effect: Effect::PerHit { weight: 2.0, cap: Some(8.0) },
    },
    Rule {
        label: "exclamations",
        measure: exclamations,
        effect: Effect::PerHit { weight: 1.5, cap: Some(6.0) },
    },
    Rule {
        label: "questions",
        measure: questions,
        effect: Effect::PerHit { weight: 1.0, cap: Some(4.0) },
    },
    Rule {
        label: "self references",
        measure: self_references,
        effect: Effect::PerHit { weight: 1.5, cap: Some(6.0) },
    },
    Rule {
        label: "strong words",
        measure: strong_words,
        effect: Effect::PerHit { weight: 2.0, cap: Some(10.0) },
    },
    Rule {
        label: "length sweet spot",
        measure: sweet_spot,
        effect: Effect::Flat(5.0),
    },
    Rule {
        label: "length near sweet spot",
        measure: near_sweet_spot,
        effect: Effect::Flat(2.0),
    },
    Rule {
        label: "thanks",
        measure: thanks,
        effect: Effect::Flat(-3.0),
    },
    Rule {
        label: "link residue",
        measure: link_residue,
        effect: Effect::Flat(-5.0),
    },
    Rule {
        label: "promo keyword",
        measure: promo_keywords,
        effect: Effect::PerHit { weight: -3.0, cap: None },
    },
    Rule {
        label: "hashtag pile",
        measure: hashtag_pile,
        effect: Effect::PerHit { weight: -2.0, cap: None },
    },
];
