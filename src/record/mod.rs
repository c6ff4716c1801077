//! Record loading and normalization.
//!
//! A [`Record`] is an immutable, read-only view over one loosely-typed capture
//! object. Every accessor returns a typed default when the underlying field is
//! missing or has the wrong shape — nothing in this layer errors or panics.
//! This is the single boundary that absorbs the input's duck typing; the rest
//! of the pipeline only sees canonical values.

mod headers;
mod kind;

pub use headers::Header;
pub use kind::{classify, Kind};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use tracing::debug;

use crate::error::ExportError;

/// How a response body is encoded in the capture.
///
/// Anything that is not `base64` (case-insensitive) is treated as UTF-8 text,
/// matching the capture format's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Utf8,
    Base64,
}

impl BodyEncoding {
    fn from_field(value: &str) -> Self {
        if value.eq_ignore_ascii_case("base64") {
            BodyEncoding::Base64
        } else {
            BodyEncoding::Utf8
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyEncoding::Utf8 => "utf-8",
            BodyEncoding::Base64 => "base64",
        }
    }
}

/// One request/response capture, wrapping the raw JSON object.
#[derive(Debug, Clone)]
pub struct Record {
    raw: Value,
}

impl Record {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The underlying capture object, for fields passed through verbatim.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Capture sequence number. Not guaranteed unique by the source; used as
    /// the primary sort key and folder-name prefix.
    pub fn seq(&self) -> i64 {
        int_field(self.raw.get("seq")).unwrap_or(0)
    }

    pub fn url(&self) -> String {
        self.string_field("url")
    }

    pub fn method(&self) -> String {
        match self.raw.get("method") {
            Some(Value::Null) | None => "GET".to_string(),
            Some(value) => value_to_string(value),
        }
    }

    pub fn status(&self) -> Option<i64> {
        int_field(self.raw.get("status"))
    }

    pub fn status_text(&self) -> String {
        self.string_field("statusText")
    }

    pub fn mime_type(&self) -> String {
        self.string_field("mimeType")
    }

    pub fn resource_type(&self) -> String {
        self.string_field("resourceType")
    }

    pub fn request_headers(&self) -> Vec<Header> {
        headers::normalize(self.raw.get("requestHeaders"))
    }

    pub fn response_headers(&self) -> Vec<Header> {
        headers::normalize(self.raw.get("responseHeaders"))
    }

    pub fn request_body_text(&self) -> String {
        self.string_field("requestBodyText")
    }

    /// The raw response payload, still in its transport encoding.
    pub fn response_body_raw(&self) -> Option<String> {
        match self.raw.get("responseBodyRaw") {
            Some(Value::Null) | None => None,
            Some(value) => Some(value_to_string(value)),
        }
    }

    pub fn response_body_encoding(&self) -> BodyEncoding {
        BodyEncoding::from_field(&self.string_field("responseBodyEncoding"))
    }

    /// Decoded response body bytes.
    ///
    /// A base64 payload that fails to decode yields an empty byte sequence
    /// rather than an error.
    pub fn response_body_bytes(&self) -> Vec<u8> {
        let body = self.response_body_raw().unwrap_or_default();
        match self.response_body_encoding() {
            BodyEncoding::Base64 => STANDARD.decode(body.as_bytes()).unwrap_or_default(),
            BodyEncoding::Utf8 => body.into_bytes(),
        }
    }

    pub fn body_size(&self) -> Option<i64> {
        int_field(self.raw.get("bodySize"))
    }

    pub fn started_date_time(&self) -> String {
        self.string_field("startedDateTime")
    }

    /// Elapsed request time in seconds.
    pub fn time_seconds(&self) -> Option<f64> {
        match self.raw.get("time") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn error_text(&self) -> String {
        self.string_field("errorText")
    }

    pub fn canceled(&self) -> bool {
        match self.raw.get("canceled") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Null) | None => false,
        }
    }

    fn string_field(&self, key: &str) -> String {
        match self.raw.get(key) {
            Some(Value::Null) | None => String::new(),
            Some(value) => value_to_string(value),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn int_field(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interpret the accepted top-level input shapes as a list of records.
///
/// Accepted: a JSON array, an object with an `entries` or `records` array,
/// or a single object treated as one record. Anything else is fatal.
pub fn from_input(value: Value) -> Result<Vec<Record>, ExportError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("entries") {
                items.clone()
            } else if let Some(Value::Array(items)) = map.get("records") {
                items.clone()
            } else {
                vec![Value::Object(map)]
            }
        }
        _ => return Err(ExportError::InvalidShape),
    };
    Ok(items.into_iter().map(Record::new).collect())
}

/// Load a capture file from disk and wrap its records.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    let records = from_input(value)?;
    debug!(count = records.len(), "loaded records");
    Ok(records)
}
