//! Rendering of per-record artifacts and the global indexes.
//!
//! Everything here is pure string/byte formatting over already-filtered
//! records; no I/O happens in this module.

use serde_json::{Map, Value};

use crate::record::{classify, Header, Record};

/// Static documentation of the archive layout. Not data-dependent.
pub const README: &str = "# Export Req/Res (Readable)\n\
\n\
This archive was produced by reqres-export from a captured list of\n\
request/response records.\n\
\n\
Each exported request has its own folder containing:\n\
\n\
- 00-meta.txt — summary metadata for the request and response.\n\
- 01-request-headers.txt — request headers, one per line.\n\
- 02-request-body.* — request payload, extension follows its content-type.\n\
- 03-response-headers.txt — response headers, one per line.\n\
- 04-response-body.* — response payload (text or binary).\n\
- 05-response-info.json — extra metadata (timing, sizes, errors).\n\
\n\
index.csv and index.md summarize every entry in the archive.\n";

/// `index.csv` contents: one row per record in final order.
pub fn index_csv(records: &[Record]) -> String {
    let mut out = String::from("seq,timestamp,method,status,mime,size,url\r\n");
    for record in records {
        let status = record.status().map(|s| s.to_string()).unwrap_or_default();
        let row = [
            record.seq().to_string(),
            record.started_date_time(),
            record.method(),
            status,
            record.mime_type(),
            record.body_size().unwrap_or(0).to_string(),
            record.url(),
        ];
        let fields: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// `index.md` contents: the same summary as a pipe table.
pub fn index_md(records: &[Record]) -> String {
    let mut lines = vec![
        "| seq | method | status | mime | size | url |".to_string(),
        "|---:|:--|:--:|:--|--:|:--|".to_string(),
    ];
    for record in records {
        let status = record.status().map(|s| s.to_string()).unwrap_or_default();
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            record.seq(),
            record.method(),
            status,
            record.mime_type(),
            record.body_size().unwrap_or(0),
            record.url(),
        ));
    }
    lines.join("\n")
}

/// `00-meta.txt` contents for one record.
pub fn meta(record: &Record) -> String {
    let status = record.status().map(|s| s.to_string()).unwrap_or_default();
    let status_line = format!("Status: {} {}", status, record.status_text());
    let mime = record.mime_type();
    let millis = (record.time_seconds().unwrap_or(0.0) * 1000.0).round() as i64;

    let mut lines = vec![
        format!("URL: {}", record.url()),
        format!("Method: {}", record.method()),
        status_line.trim_end().to_string(),
        format!("MIME: {}", if mime.is_empty() { "-" } else { mime.as_str() }),
        format!("Size: {}", record.body_size().unwrap_or(0)),
        format!("Started: {}", record.started_date_time()),
        format!("Time(ms): {}", millis),
        format!("Category: {}", classify(record)),
    ];
    let error = record.error_text();
    if !error.is_empty() {
        lines.push(format!("Error: {}", error));
    }
    if record.canceled() {
        lines.push("Canceled: true".to_string());
    }
    lines.join("\n")
}

/// Header block: one `name: value` line per header, original order.
pub fn headers_block(headers: &[Header]) -> String {
    headers
        .iter()
        .map(|h| format!("{}: {}", h.name, h.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `05-response-info.json` contents: a pretty-printed object carrying the
/// input's `timing`, `encodedDataLength`, `errorText`, `canceled` and
/// `resourceType` fields when present, plus `bodySize` and
/// `responseBodyEncoding` always.
pub fn response_info(record: &Record) -> String {
    let mut payload = Map::new();
    for key in [
        "timing",
        "encodedDataLength",
        "errorText",
        "canceled",
        "resourceType",
    ] {
        if let Some(value) = record.raw().get(key) {
            payload.insert(key.to_string(), value.clone());
        }
    }
    payload.insert(
        "bodySize".to_string(),
        record.body_size().map(Value::from).unwrap_or(Value::Null),
    );
    payload.insert(
        "responseBodyEncoding".to_string(),
        Value::from(record.response_body_encoding().as_str()),
    );
    serde_json::to_string_pretty(&Value::Object(payload)).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::new(value)
    }

    #[test]
    fn meta_renders_all_fixed_lines() {
        let r = record(json!({
            "seq": 1,
            "url": "https://a.test/api",
            "method": "GET",
            "status": 200,
            "statusText": "OK",
            "mimeType": "application/json",
            "bodySize": 11,
            "startedDateTime": "2024-05-01T12:00:00Z",
            "time": 0.1234,
        }));
        let meta = meta(&r);
        let lines: Vec<&str> = meta.lines().collect();
        assert_eq!(lines[0], "URL: https://a.test/api");
        assert_eq!(lines[1], "Method: GET");
        assert_eq!(lines[2], "Status: 200 OK");
        assert_eq!(lines[3], "MIME: application/json");
        assert_eq!(lines[4], "Size: 11");
        assert_eq!(lines[5], "Started: 2024-05-01T12:00:00Z");
        assert_eq!(lines[6], "Time(ms): 123");
        assert_eq!(lines[7], "Category: xhr");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn meta_trims_status_line_and_dashes_missing_mime() {
        let r = record(json!({"url": "https://a.test/"}));
        let meta = meta(&r);
        assert!(meta.contains("Status:\n"), "got: {meta}");
        assert!(meta.contains("MIME: -"));
        assert!(meta.contains("Size: 0"));
        assert!(meta.contains("Time(ms): 0"));
    }

    #[test]
    fn meta_appends_error_and_canceled_lines() {
        let r = record(json!({
            "errorText": "net::ERR_ABORTED",
            "canceled": true,
        }));
        let meta = meta(&r);
        assert!(meta.ends_with("Error: net::ERR_ABORTED\nCanceled: true"));
    }

    #[test]
    fn headers_block_preserves_order() {
        let headers = vec![
            Header {
                name: "B".to_string(),
                value: "2".to_string(),
            },
            Header {
                name: "A".to_string(),
                value: "1".to_string(),
            },
        ];
        assert_eq!(headers_block(&headers), "B: 2\nA: 1");
    }

    #[test]
    fn index_csv_has_header_and_quotes_commas() {
        let records = vec![record(json!({
            "seq": 1,
            "url": "https://a.test/q?x=1,2",
            "method": "GET",
            "status": 200,
            "mimeType": "application/json",
            "bodySize": 5,
            "startedDateTime": "t0",
        }))];
        let csv = index_csv(&records);
        let mut lines = csv.split("\r\n");
        assert_eq!(
            lines.next(),
            Some("seq,timestamp,method,status,mime,size,url")
        );
        assert_eq!(
            lines.next(),
            Some("1,t0,GET,200,application/json,5,\"https://a.test/q?x=1,2\"")
        );
    }

    #[test]
    fn index_csv_blanks_missing_status() {
        let records = vec![record(json!({"seq": 2, "url": "https://a.test/"}))];
        let csv = index_csv(&records);
        assert!(csv.contains("2,,GET,,,0,https://a.test/"));
    }

    #[test]
    fn index_md_is_a_pipe_table() {
        let records = vec![record(json!({
            "seq": 1,
            "url": "https://a.test/",
            "method": "GET",
            "status": 200,
            "mimeType": "text/html",
            "bodySize": 3,
        }))];
        let md = index_md(&records);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| seq | method | status | mime | size | url |");
        assert_eq!(lines[1], "|---:|:--|:--:|:--|--:|:--|");
        assert_eq!(lines[2], "| 1 | GET | 200 | text/html | 3 | https://a.test/ |");
    }

    #[test]
    fn response_info_carries_passthrough_keys() {
        let r = record(json!({
            "timing": {"requestTime": 1.5},
            "encodedDataLength": 512,
            "resourceType": "fetch",
            "bodySize": 11,
            "responseBodyEncoding": "BASE64",
        }));
        let info: serde_json::Value = serde_json::from_str(&response_info(&r)).unwrap();
        assert_eq!(info["timing"]["requestTime"], json!(1.5));
        assert_eq!(info["encodedDataLength"], json!(512));
        assert_eq!(info["resourceType"], json!("fetch"));
        assert_eq!(info["bodySize"], json!(11));
        assert_eq!(info["responseBodyEncoding"], json!("base64"));
        assert!(info.get("errorText").is_none());
        assert!(info.get("canceled").is_none());
    }

    #[test]
    fn response_info_always_has_body_size_and_encoding() {
        let info: serde_json::Value =
            serde_json::from_str(&response_info(&record(json!({})))).unwrap();
        assert_eq!(info["bodySize"], serde_json::Value::Null);
        assert_eq!(info["responseBodyEncoding"], json!("utf-8"));
    }

    #[test]
    fn response_info_is_two_space_indented() {
        let text = response_info(&record(json!({"bodySize": 1})));
        assert!(text.contains("\n  \"bodySize\": 1"));
    }
}
