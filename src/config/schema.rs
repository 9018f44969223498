use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pool::Author;

pub const DEFAULT_COUNT: u32 = 30;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_POOL_SIZE: usize = 150;

/// Generator configuration.
///
/// Example YAML:
/// ```yaml
/// raw_dir: scripts/raw_data
/// output: src/data/tweets.json
/// count: 30
/// seed: 42
/// pool_size: 150
/// authors:
///   - name: Elon Musk
///     handle: "@elonmusk"
///     source: TweetsElonMusk.csv
///     text_col: tweet
///     id_col: id
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the raw archives; author sources are relative to it
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,

    /// Where the puzzle JSON is written
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of puzzle attempts to make
    #[serde(default = "default_count")]
    pub count: u32,

    /// Seed for every random draw in a run
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum candidates kept per author after dedup
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Authors to draw from; the built-in six when the key is absent
    #[serde(default = "default_authors")]
    pub authors: Vec<AuthorConfig>,
}

/// One author and the archive their tweets come from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuthorConfig {
    /// Display name, also the answer shown to players
    pub name: String,

    /// Handle including the leading '@'
    pub handle: String,

    /// Archive file, relative to `raw_dir` (`.json` or CSV)
    pub source: String,

    /// CSV column holding the tweet text (ignored for JSON)
    #[serde(default = "default_text_col")]
    pub text_col: String,

    /// CSV column holding the tweet id
    #[serde(default)]
    pub id_col: Option<String>,
}

impl AuthorConfig {
    fn new(name: &str, handle: &str, source: &str, text_col: &str, id_col: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: handle.to_string(),
            source: source.to_string(),
            text_col: text_col.to_string(),
            id_col: Some(id_col.to_string()),
        }
    }

    pub fn author(&self) -> Author {
        Author::new(&self.name, &self.handle)
    }
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("scripts").join("raw_data")
}

fn default_output() -> PathBuf {
    PathBuf::from("src").join("data").join("tweets.json")
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_text_col() -> String {
    "text".to_string()
}

fn default_authors() -> Vec<AuthorConfig> {
    let celebrity_data = "twitter-celebrity-tweets-data/twitter-celebrity-tweets-data";
    vec![
        AuthorConfig::new(
            "Donald Trump",
            "@realDonaldTrump",
            "realdonaldtrump.csv",
            "content",
            "id",
        ),
        AuthorConfig::new("Elon Musk", "@elonmusk", "TweetsElonMusk.csv", "tweet", "id"),
        AuthorConfig::new("Kanye West", "@kanyewest", "kanye_archive.json", "text", "id"),
        AuthorConfig::new(
            "Kim Kardashian",
            "@KimKardashian",
            "KimKardashian.csv",
            "content",
            "id",
        ),
        AuthorConfig::new(
            "50 Cent",
            "@50cent",
            &format!("{}/50cent.csv", celebrity_data),
            "tweet",
            "twitter_id",
        ),
        AuthorConfig::new(
            "Snoop Dogg",
            "@SnoopDogg",
            &format!("{}/SnoopDogg.csv", celebrity_data),
            "tweet",
            "twitter_id",
        ),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            output: default_output(),
            count: DEFAULT_COUNT,
            seed: DEFAULT_SEED,
            pool_size: DEFAULT_POOL_SIZE,
            authors: default_authors(),
        }
    }
}
