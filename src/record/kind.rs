//! Content-kind classification.

use std::fmt;

use super::Record;

/// Content classification of a record. Every record has exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Xhr,
    Js,
    Css,
    Img,
    Media,
    Font,
    Doc,
    Ws,
    Wasm,
    Manifest,
    Other,
}

impl Kind {
    /// Every kind, in the order the capture dashboard lists them.
    pub const ALL: [Kind; 11] = [
        Kind::Xhr,
        Kind::Js,
        Kind::Css,
        Kind::Img,
        Kind::Media,
        Kind::Font,
        Kind::Doc,
        Kind::Ws,
        Kind::Wasm,
        Kind::Manifest,
        Kind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Xhr => "xhr",
            Kind::Js => "js",
            Kind::Css => "css",
            Kind::Img => "img",
            Kind::Media => "media",
            Kind::Font => "font",
            Kind::Doc => "doc",
            Kind::Ws => "ws",
            Kind::Wasm => "wasm",
            Kind::Manifest => "manifest",
            Kind::Other => "other",
        }
    }

    /// Look up a kind by its lower-case name.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a record by its resource-type hint, then by MIME type.
///
/// Pure and total: the same record always yields the same kind and no record
/// fails to classify.
pub fn classify(record: &Record) -> Kind {
    let hint = record.resource_type().to_lowercase();
    if !hint.is_empty() {
        if hint.contains("xhr") || hint.contains("fetch") {
            return Kind::Xhr;
        }
        if hint.contains("script") {
            return Kind::Js;
        }
        if hint.contains("stylesheet") {
            return Kind::Css;
        }
        if hint.contains("image") {
            return Kind::Img;
        }
        if hint.contains("media") {
            return Kind::Media;
        }
        if hint.contains("font") {
            return Kind::Font;
        }
        if hint.contains("document") {
            return Kind::Doc;
        }
        if hint.contains("websocket") {
            return Kind::Ws;
        }
        if hint.contains("wasm") {
            return Kind::Wasm;
        }
        if hint.contains("manifest") {
            return Kind::Manifest;
        }
    }

    let mime = record.mime_type().to_lowercase();
    if mime.starts_with("image/") {
        return Kind::Img;
    }
    if mime.starts_with("video/") || mime.starts_with("audio/") {
        return Kind::Media;
    }
    if mime == "text/css" {
        return Kind::Css;
    }
    if mime.contains("javascript") {
        return Kind::Js;
    }
    if mime.contains("json") {
        return Kind::Xhr;
    }
    if mime == "text/html" {
        return Kind::Doc;
    }
    if mime == "application/wasm" {
        return Kind::Wasm;
    }
    if mime.contains("font") {
        return Kind::Font;
    }
    if mime.contains("manifest") {
        return Kind::Manifest;
    }
    Kind::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::new(value)
    }

    #[test]
    fn resource_type_hint_wins_over_mime() {
        // A fetch is xhr regardless of its MIME type.
        let r = record(json!({"resourceType": "Fetch", "mimeType": "text/css"}));
        assert_eq!(classify(&r), Kind::Xhr);
        let r = record(json!({"resourceType": "XHR", "mimeType": "image/png"}));
        assert_eq!(classify(&r), Kind::Xhr);
    }

    #[test]
    fn resource_type_substring_matches() {
        for (hint, kind) in [
            ("script", Kind::Js),
            ("Stylesheet", Kind::Css),
            ("image", Kind::Img),
            ("media", Kind::Media),
            ("font", Kind::Font),
            ("Document", Kind::Doc),
            ("websocket", Kind::Ws),
            ("wasm", Kind::Wasm),
            ("manifest", Kind::Manifest),
        ] {
            let r = record(json!({"resourceType": hint}));
            assert_eq!(classify(&r), kind, "hint {hint:?}");
        }
    }

    #[test]
    fn unknown_resource_type_falls_through_to_mime() {
        let r = record(json!({"resourceType": "preflight", "mimeType": "application/json"}));
        assert_eq!(classify(&r), Kind::Xhr);
    }

    #[test]
    fn mime_fallback_branches() {
        for (mime, kind) in [
            ("image/png", Kind::Img),
            ("video/mp4", Kind::Media),
            ("audio/ogg", Kind::Media),
            ("text/css", Kind::Css),
            ("application/javascript", Kind::Js),
            ("application/json", Kind::Xhr),
            ("text/html", Kind::Doc),
            ("application/wasm", Kind::Wasm),
            ("font/woff2", Kind::Font),
            ("application/manifest+json", Kind::Xhr), // json outranks manifest
            ("text/manifest", Kind::Manifest),
            ("application/octet-stream", Kind::Other),
        ] {
            let r = record(json!({"mimeType": mime}));
            assert_eq!(classify(&r), kind, "mime {mime:?}");
        }
    }

    #[test]
    fn empty_record_is_other() {
        assert_eq!(classify(&record(json!({}))), Kind::Other);
    }

    #[test]
    fn names_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(Kind::from_name("bogus"), None);
        assert_eq!(Kind::ALL.len(), 11);
    }
}
