use std::collections::HashSet;

use super::types::TextRecord;

/// Characters of lowercased text that decide whether two tweets are the same.
pub const DEDUP_PREFIX_CHARS: usize = 60;

/// Key used to detect near-duplicate tweets from one author.
pub fn dedup_key(text: &str) -> String {
    text.to_lowercase().chars().take(DEDUP_PREFIX_CHARS).collect()
}

/// Greedy prefix dedup over records already sorted best-first.
///
/// Keeps the first record for each key and stops once `limit` records are kept.
pub fn dedup(records: impl IntoIterator<Item = TextRecord>, limit: usize) -> Vec<TextRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for record in records {
        if unique.len() >= limit {
            break;
        }
        if seen.insert(dedup_key(&record.text)) {
            unique.push(record);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, score: f64) -> TextRecord {
        TextRecord {
            text: text.to_string(),
            author: "Someone".to_string(),
            source_url: String::new(),
            score,
        }
    }

    #[test]
    fn test_dedup_case_insensitive_prefix() {
        let shared = "x".repeat(60);
        let records = vec![
            record(&format!("{}AAA", shared), 9.0),
            record(&format!("{}bbb", shared.to_uppercase()), 8.0),
            record("something else entirely", 7.0),
        ];
        let unique = dedup(records, 10);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].score, 9.0); // Best of the duplicates wins
        assert_eq!(unique[1].text, "something else entirely");
    }

    #[test]
    fn test_dedup_difference_inside_prefix_is_kept() {
        let records = vec![
            record("Short tweet number one", 3.0),
            record("Short tweet number two", 2.0),
        ];
        assert_eq!(dedup(records, 10).len(), 2);
    }

    #[test]
    fn test_dedup_stops_at_limit() {
        let records: Vec<_> = (0..20)
            .map(|i| record(&format!("distinct tweet {}", i), 20.0 - i as f64))
            .collect();
        let unique = dedup(records, 5);
        assert_eq!(unique.len(), 5);
        assert_eq!(unique[4].text, "distinct tweet 4");
    }

    #[test]
    fn test_dedup_keys_unique_in_output() {
        let records: Vec<_> = ["Hello World", "hello world", "HELLO WORLD!", "hello world!"]
            .iter()
            .map(|t| record(t, 1.0))
            .collect();
        let unique = dedup(records, 10);
        let keys: HashSet<_> = unique.iter().map(|r| dedup_key(&r.text)).collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(unique.len(), 2);
    }
}
