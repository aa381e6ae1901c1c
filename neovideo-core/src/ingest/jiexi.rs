//! Parse-proxy list parser
//!
//! Accepts either a JSON array or freeform text with one source per line.
//! The format is detected once for the whole input; the two modes never mix.
//!
//! Freeform lines look like one of:
//!
//! ```text
//! https://jx.example.com/?url=
//! 虾米解析： https://jx.xmflv.com/?url=
//! ```
//!
//! Comment lines start with `//` or `;`.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::ParseRecord;

/// Lines of this many bytes or fewer cannot hold a usable proxy URL.
const MIN_LINE_LEN: usize = 6;

const NAME_ALIASES: &[&str] = &["name", "title"];
const URL_ALIASES: &[&str] = &["url", "jiexi_url", "jiexiUrl"];

/// Cheap pre-filter: a proxy line carries a query assignment somewhere.
static FUZZY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(jiexi|jiexiurl|url)?=")
        .expect("fuzzy proxy regex is a compile-time constant and always valid")
});

/// Parse-proxy URL shape, anchored at the start of the line.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[-A-Za-z0-9+&@#/%?=~_|!:,.;]+[-A-Za-z0-9+&@#/%=~_|]")
        .expect("proxy url regex is a compile-time constant and always valid")
});

/// Optional label, then a proxy URL ending in `=`.
///
/// Whitespace classes are spelled out as ASCII so a full-width space stays
/// part of the label.
static LABELED_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([^\t\n\f\r ]*:?)[\t\n\f\r ]*(https?://[-A-Za-z0-9+&@#/%?=~_|!:,.;]+[-A-Za-z0-9+&@#/%=~_|]=)",
    )
    .expect("labeled proxy url regex is a compile-time constant and always valid")
});

static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(//|;)").expect("comment regex is a compile-time constant and always valid")
});

/// Trailing punctuation dropped from labels, ASCII and full-width.
static LABEL_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,.:：，。]*$")
        .expect("label suffix regex is a compile-time constant and always valid")
});

/// Parse raw user input into deduplicated parse-proxy records.
///
/// Never fails; unusable input yields an empty list. When the same URL shows
/// up more than once the last record wins, while the output keeps the order
/// in which each URL first appeared.
#[must_use]
pub fn parse_jiexi(raw: &str) -> Vec<ParseRecord> {
    let candidates = match serde_json::from_str::<Value>(raw) {
        Ok(value) => parse_structured(&value),
        Err(_) => parse_lines(raw),
    };

    let mut by_url: IndexMap<String, ParseRecord> = IndexMap::new();
    for record in candidates {
        if record.url.is_empty() {
            continue;
        }
        by_url.insert(record.url.clone(), record);
    }

    debug!(records = by_url.len(), "Parsed parse-proxy input");
    by_url.into_values().collect()
}

/// Whether `candidate` starts with something shaped like a proxy URL.
#[must_use]
pub fn looks_like_proxy_url(candidate: &str) -> bool {
    URL_REGEX.is_match(candidate)
}

fn parse_structured(value: &Value) -> Vec<ParseRecord> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => structured_record(fields),
            other => {
                let candidate = scalar_text(other)?;
                looks_like_proxy_url(&candidate).then(|| ParseRecord::url_only(candidate))
            }
        })
        .collect()
}

/// Object element: each field falls back through its aliases on its own.
/// URLs taken from objects are trusted as given.
fn structured_record(fields: &Map<String, Value>) -> Option<ParseRecord> {
    let name = first_text(fields, NAME_ALIASES);
    let url = first_text(fields, URL_ALIASES);
    if name.is_none() && url.is_none() {
        return None;
    }
    Some(ParseRecord::new(name, url.unwrap_or_default()))
}

fn first_text(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| fields.get(*key).and_then(scalar_text))
        .find(|text| !text.is_empty())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_lines(raw: &str) -> Vec<ParseRecord> {
    raw.split('\n').filter_map(|line| parse_line(line.trim())).collect()
}

fn parse_line(line: &str) -> Option<ParseRecord> {
    if line.len() <= MIN_LINE_LEN || !FUZZY_REGEX.is_match(line) || COMMENT_REGEX.is_match(line)
    {
        return None;
    }

    // A line that opens with a URL is URL-only; it never falls back to the
    // labeled form, even when it does not end in `=`.
    if looks_like_proxy_url(line) {
        return line.ends_with('=').then(|| ParseRecord::url_only(line));
    }

    let captures = LABELED_URL_REGEX.captures(line)?;
    let label = captures.get(1).map_or("", |m| m.as_str());
    let url = captures.get(2)?.as_str();
    let name = LABEL_SUFFIX_REGEX.replace(label, "").into_owned();

    Some(ParseRecord::new(Some(name), url))
}
