//! Deterministic, filesystem-safe paths for archive entries.

use url::Url;

use crate::record::{BodyEncoding, Record};

/// Number of trailing URL-path characters kept in a folder name.
const PATH_TAIL_LEN: usize = 60;

/// Sanitize a string for use in archive paths.
///
/// Every run of characters outside `[A-Za-z0-9._-]` becomes a single `_`,
/// then leading and trailing underscores are stripped. Idempotent.
pub fn sanitize(value: &str) -> String {
    replace_invalid_runs(value).trim_matches('_').to_string()
}

fn replace_invalid_runs(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

fn collapse_underscores(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_underscore = false;
    for c in value.chars() {
        if c == '_' {
            if !prev_underscore {
                out.push(c);
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }
    out
}

fn char_tail(value: &str, max_chars: usize) -> &str {
    let count = value.chars().count();
    if count <= max_chars {
        return value;
    }
    value
        .char_indices()
        .nth(count - max_chars)
        .map(|(idx, _)| &value[idx..])
        .unwrap_or(value)
}

/// Derive the archive folder name for one record:
/// `{seq:05}__{METHOD}__{host}{path-tail}`.
///
/// The double-underscore field separators are literal; only the host+path
/// portion is collapsed and trimmed. Seq is clamped to zero, the method is
/// upper-cased, the host falls back to `unknown` when the URL does not parse,
/// and only the last 60 path characters are kept. Names are deterministic but
/// not guaranteed unique; the archive writer disambiguates collisions.
pub fn folder_name(record: &Record) -> String {
    let seq = record.seq().max(0);
    let mut method = sanitize(&record.method().to_uppercase());
    if method.is_empty() {
        method = "GET".to_string();
    }

    let (host, path) = match Url::parse(&record.url()) {
        Ok(url) => (
            url.host_str().unwrap_or("unknown").to_string(),
            url.path().to_string(),
        ),
        Err(_) => ("unknown".to_string(), String::new()),
    };
    let host = match sanitize(&host) {
        h if h.is_empty() => "unknown".to_string(),
        h => h,
    };
    // Keep the path's leading separator as `_` so host and path stay apart.
    let path = replace_invalid_runs(&path);
    let site = collapse_underscores(&format!("{}{}", host, char_tail(&path, PATH_TAIL_LEN)));
    let site = site.trim_matches('_');

    if site.is_empty() {
        format!("{seq:05}__{method}")
    } else {
        format!("{seq:05}__{method}__{site}")
    }
}

/// Pick a body-file extension from a MIME type and body encoding.
pub fn extension(mime: &str, encoding: BodyEncoding) -> String {
    let mime = mime.to_lowercase();
    if mime.contains("json") {
        return ".json".to_string();
    }
    if mime == "text/html" {
        return ".html".to_string();
    }
    if mime.contains("xml") {
        return ".xml".to_string();
    }
    if mime == "text/plain" {
        return ".txt".to_string();
    }
    for prefix in ["image/", "video/", "audio/"] {
        if let Some(rest) = mime.strip_prefix(prefix) {
            return format!(".{}", subtype(rest));
        }
    }
    if mime == "application/wasm" {
        return ".wasm".to_string();
    }
    if let Some(rest) = mime.strip_prefix("text/") {
        return format!(".{}", subtype(rest));
    }
    match encoding {
        BodyEncoding::Base64 => ".bin".to_string(),
        BodyEncoding::Utf8 => ".txt".to_string(),
    }
}

fn subtype(rest: &str) -> &str {
    rest.split(';').next().unwrap_or(rest)
}

/// Extension for the request body, derived from the request's `content-type`
/// header (case-insensitive name, first match). Request bodies are always
/// text, so the encoding is fixed to UTF-8.
pub fn request_body_extension(record: &Record) -> String {
    let content_type = record
        .request_headers()
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-type"))
        .map(|h| h.value.clone())
        .unwrap_or_default();
    extension(&content_type, BodyEncoding::Utf8)
}
