pub mod clean;
pub mod json;
pub mod table;

pub use clean::clean_text;
pub use json::parse_json;
pub use table::parse_csv;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// A tweet as read from an archive, before cleaning and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub text: String,
    pub id: String,
}

/// Ids that exports use for "no id".
const EMPTY_IDS: &[&str] = &["", "nan", "None"];

/// Build the status URL for a tweet. Returns an empty string when the id is missing.
pub fn build_source_url(handle: &str, tweet_id: &str) -> String {
    if EMPTY_IDS.contains(&tweet_id) {
        return String::new();
    }
    let handle = handle.trim_start_matches('@');
    format!("https://x.com/{}/status/{}", handle, tweet_id)
}

/// Load raw records from an archive file.
///
/// `.json` files are read as JSON, anything else as CSV. A missing file is
/// not an error: it yields no records and logs a warning.
pub fn load_source(path: &Path, text_col: &str, id_col: Option<&str>) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        warn!("{} not found, skipping", path.display());
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open archive at {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json(reader).with_context(|| format!("Failed to load {}", path.display()))
    } else {
        parse_csv(reader, text_col, id_col)
            .with_context(|| format!("Failed to load {}", path.display()))
    }
}
