use regex::Regex;
use std::sync::OnceLock;

static HEX_ESCAPE: OnceLock<Regex> = OnceLock::new();
static URL: OnceLock<Regex> = OnceLock::new();
static LEADING_MENTIONS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

/// Escaped UTF-8 punctuation found in byte-string dumps, with plain replacements.
const ESCAPED_PUNCTUATION: &[(&str, &str)] = &[
    (r"\n", " "),
    (r"\xe2\x80\x99", "'"),
    (r"\xe2\x80\x9c", "\""),
    (r"\xe2\x80\x9d", "\""),
    (r"\xe2\x80\xa6", "..."),
    (r"\xe2\x80\x93", "-"),
    (r"\xe2\x80\x94", "-"),
    (r"\xe2\x80\x98", "'"),
];

fn hex_escape() -> &'static Regex {
    HEX_ESCAPE.get_or_init(|| Regex::new(r"\\x[0-9a-fA-F]{2}").expect("valid regex"))
}

fn url() -> &'static Regex {
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("valid regex"))
}

fn leading_mentions() -> &'static Regex {
    LEADING_MENTIONS.get_or_init(|| Regex::new(r"^(?:@\w+\s*)+").expect("valid regex"))
}

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Unwrap a `b'...'` / `b"..."` literal and decode the escapes that matter for display.
fn decode_byte_literal(text: &str) -> String {
    let mut inner = text[2..].chars();
    inner.next_back(); // closing quote
    let mut decoded = inner.as_str().to_string();
    for (escaped, plain) in ESCAPED_PUNCTUATION {
        decoded = decoded.replace(escaped, plain);
    }
    hex_escape().replace_all(&decoded, "").into_owned()
}

/// Normalize a raw tweet: decode byte-string dumps, drop links and leading
/// mentions, collapse whitespace.
pub fn clean_text(raw: &str) -> String {
    let text = if raw.starts_with("b'") || raw.starts_with("b\"") {
        decode_byte_literal(raw)
    } else {
        raw.to_string()
    };

    let text = url().replace_all(&text, "");
    let text = leading_mentions().replace(&text, "");
    whitespace().replace_all(&text, " ").trim().to_string()
}
