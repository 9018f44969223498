use anyhow::{Context, Result};
use std::io::Read;
use tracing::debug;

use super::RawRecord;

/// Parse a CSV tweet export with a header row.
///
/// `text_col` must exist in the header. `id_col` is optional; when it is
/// missing every record gets an empty id. Rows that fail to parse or are too
/// short to hold the text field are skipped.
pub fn parse_csv<R: Read>(
    reader: R,
    text_col: &str,
    id_col: Option<&str>,
) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let text_idx = headers
        .iter()
        .position(|h| h == text_col)
        .with_context(|| format!("Text column '{}' not found in CSV header", text_col))?;
    let id_idx = id_col.and_then(|col| headers.iter().position(|h| h == col));

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let Some(text) = row.get(text_idx) else {
            skipped += 1;
            continue;
        };
        let id = id_idx
            .and_then(|i| row.get(i))
            .unwrap_or_default()
            .to_string();
        records.push(RawRecord {
            text: text.to_string(),
            id,
        });
    }

    if skipped > 0 {
        debug!(skipped, "Skipped malformed CSV rows");
    }

    Ok(records)
}
