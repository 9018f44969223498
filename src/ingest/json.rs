use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::Read;

use super::RawRecord;

/// Render an id the way it appears in a status URL.
fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First present field among `keys`.
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

/// Non-string text (numbers, nulls) counts as empty.
fn text_of(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Parse a JSON tweet archive.
///
/// Two layouts are accepted: an object keyed by tweet id, or a plain array of
/// tweet objects. Entries that are not objects are skipped.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let data: Value = serde_json::from_reader(reader).context("Failed to parse JSON archive")?;

    let records = match data {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, entry)| {
                let obj = entry.as_object()?;
                Some(RawRecord {
                    text: text_of(field(obj, &["post_text", "text", "full_text"])),
                    id: field(obj, &["id_str", "id"])
                        .map(id_string)
                        .unwrap_or_else(|| key.clone()),
                })
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|entry| {
                let obj = entry.as_object()?;
                Some(RawRecord {
                    text: text_of(field(obj, &["text", "full_text"])),
                    id: field(obj, &["id_str", "id"]).map(id_string).unwrap_or_default(),
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_layout() {
        let json = r#"[
            {"text": "first", "id_str": "100"},
            {"full_text": "second", "id": 200},
            "not an object",
            {"text": 42}
        ]"#;
        let records = parse_json(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawRecord { text: "first".into(), id: "100".into() });
        assert_eq!(records[1], RawRecord { text: "second".into(), id: "200".into() });
        assert_eq!(records[2].text, "");
        assert_eq!(records[2].id, "");
    }

    #[test]
    fn test_parse_object_layout_falls_back_to_key() {
        let json = r#"{
            "9001": {"post_text": "keyed"},
            "9002": {"text": "with id", "id": "123"},
            "9003": null
        }"#;
        let records = parse_json(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.contains(&RawRecord { text: "keyed".into(), id: "9001".into() }));
        assert!(records.contains(&RawRecord { text: "with id".into(), id: "123".into() }));
    }

    #[test]
    fn test_parse_object_layout_keeps_file_order() {
        let json = r#"{
            "9": {"text": "nine"},
            "10": {"text": "ten"},
            "1": {"text": "one"}
        }"#;
        let records = parse_json(json.as_bytes()).unwrap();
        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["nine", "ten", "one"]);
    }

    #[test]
    fn test_parse_prefers_post_text() {
        let json = r#"{"1": {"post_text": "post", "text": "plain"}}"#;
        let records = parse_json(json.as_bytes()).unwrap();
        assert_eq!(records[0].text, "post");
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse_json("{not json".as_bytes()).is_err());
    }

    #[test]
    fn test_parse_scalar_document_is_empty() {
        assert!(parse_json("42".as_bytes()).unwrap().is_empty());
    }
}
