//! MacCMS JSON payload decoding
//!
//! Upstream sites run many MacCMS forks and none of them version their
//! schema. Decoding therefore works on the untyped JSON tree, but in two
//! explicit steps: classify the shape first, then read canonical fields
//! through the alias tables in [`alias`]. A malformed element degrades to a
//! zero-value entry instead of failing the whole payload.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ProviderClientError;
use crate::model::{Category, ListAttributes, ListResult, VideoSummary};

/// Layout of the `vod_time` field.
pub const VOD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field alias priority tables, one per canonical field.
///
/// Lookup walks a table in order and stops at the first alias carrying a
/// non-empty value.
pub mod alias {
    pub const PAGE_COUNT: &[&str] = &["pagecount"];
    pub const PAGE: &[&str] = &["page"];
    pub const RECORD_COUNT: &[&str] = &["total"];

    pub const VIDEO_ID: &[&str] = &["vod_id", "id"];
    pub const VIDEO_CATEGORY_ID: &[&str] = &["type_id", "tid"];
    pub const VIDEO_NAME: &[&str] = &["vod_name", "name", "title"];
    pub const VIDEO_TIME: &[&str] = &["vod_time", "time"];

    pub const CATEGORY_ID: &[&str] = &["type_id", "id"];
    pub const CATEGORY_NAME: &[&str] = &["type_name", "name"];

    pub const LIST: &str = "list";
    pub const CLASS: &str = "class";
}

/// Shape of a JSON node as far as decoding is concerned.
enum Shape<'a> {
    Object(&'a Map<String, Value>),
    Other,
}

impl<'a> Shape<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(map),
            _ => Self::Other,
        }
    }
}

/// Decode a raw response body.
///
/// Fails only when the body is not syntactically valid JSON.
pub fn decode_body(body: &[u8]) -> Result<ListResult, ProviderClientError> {
    let value: Value = serde_json::from_slice(body)?;
    Ok(decode_value(&value))
}

/// Decode an already parsed payload. Never fails.
#[must_use]
pub fn decode_value(value: &Value) -> ListResult {
    let Shape::Object(root) = Shape::of(value) else {
        debug!("MacCMS payload is not an object, using empty result");
        return ListResult::default();
    };

    let attributes = ListAttributes {
        page_count: lookup_u64(root, alias::PAGE_COUNT),
        page: lookup_u64(root, alias::PAGE),
        record_count: lookup_u64(root, alias::RECORD_COUNT),
    };

    let videos = elements(root, alias::LIST).iter().map(decode_video).collect();
    let categories = elements(root, alias::CLASS)
        .iter()
        .map(decode_category)
        .collect();

    ListResult {
        attributes,
        videos,
        categories,
    }
}

fn decode_video(value: &Value) -> VideoSummary {
    match Shape::of(value) {
        Shape::Object(item) => VideoSummary {
            id: lookup_u64(item, alias::VIDEO_ID),
            category_id: lookup_u64(item, alias::VIDEO_CATEGORY_ID),
            name: lookup_string(item, alias::VIDEO_NAME),
            last: parse_vod_time(&lookup_string(item, alias::VIDEO_TIME)),
        },
        Shape::Other => VideoSummary::default(),
    }
}

fn decode_category(value: &Value) -> Category {
    match Shape::of(value) {
        Shape::Object(item) => Category {
            id: lookup_u64(item, alias::CATEGORY_ID),
            name: lookup_string(item, alias::CATEGORY_NAME),
        },
        Shape::Other => Category::default(),
    }
}

/// Parse a `vod_time` value, degrading to the Unix epoch.
#[must_use]
pub fn parse_vod_time(raw: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(raw.trim(), VOD_TIME_FORMAT)
        .map(|t| t.and_utc())
        .unwrap_or_default()
}

fn elements<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// First alias whose value is present and non-empty.
fn first_present<'a>(item: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
}

fn lookup_string(item: &Map<String, Value>, aliases: &[&str]) -> String {
    match first_present(item, aliases) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn lookup_u64(item: &Map<String, Value>, aliases: &[&str]) -> u64 {
    first_present(item, aliases).map_or(0, coerce_u64)
}

/// Numbers and numeric strings are both accepted; anything else is zero.
fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}
