//! ZIP archive assembly.
//!
//! The writer renders every artifact for the already-filtered, already-sorted
//! record list and appends them sequentially to a single DEFLATE-compressed
//! ZIP. Output is all-or-nothing: entries are written to a temporary file in
//! the destination directory and the file is moved into place only after the
//! archive is finalized, so a failure never leaves a partial archive behind.

mod paths;
mod render;

pub use paths::{extension, folder_name, request_body_extension, sanitize};
pub use render::README;

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Timelike};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::record::Record;

/// Write the export archive for `records` at `output`.
///
/// Records must already be filtered and sorted; each one becomes a folder of
/// six artifacts. Returns the size in bytes of the finished archive.
pub fn write_archive(records: &[Record], output: &Path) -> Result<u64> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(entry_timestamp());

    {
        let mut zip = ZipWriter::new(tmp.as_file_mut());

        zip.start_file("README.md", options)?;
        zip.write_all(render::README.as_bytes())?;
        zip.start_file("index.csv", options)?;
        zip.write_all(render::index_csv(records).as_bytes())?;
        zip.start_file("index.md", options)?;
        zip.write_all(render::index_md(records).as_bytes())?;

        let mut used = HashMap::new();
        for record in records {
            let folder = unique_folder_name(&mut used, paths::folder_name(record));
            debug!(folder = %folder, "writing record entries");

            zip.start_file(format!("{folder}/00-meta.txt"), options)?;
            zip.write_all(render::meta(record).as_bytes())?;

            zip.start_file(format!("{folder}/01-request-headers.txt"), options)?;
            zip.write_all(render::headers_block(&record.request_headers()).as_bytes())?;

            let request_ext = paths::request_body_extension(record);
            zip.start_file(format!("{folder}/02-request-body{request_ext}"), options)?;
            zip.write_all(record.request_body_text().as_bytes())?;

            zip.start_file(format!("{folder}/03-response-headers.txt"), options)?;
            zip.write_all(render::headers_block(&record.response_headers()).as_bytes())?;

            let response_ext =
                paths::extension(&record.mime_type(), record.response_body_encoding());
            zip.start_file(format!("{folder}/04-response-body{response_ext}"), options)?;
            zip.write_all(&record.response_body_bytes())?;

            zip.start_file(format!("{folder}/05-response-info.json"), options)?;
            zip.write_all(render::response_info(record).as_bytes())?;
        }

        zip.finish().context("Failed to finalize the archive")?;
    }

    let size = tmp
        .as_file()
        .metadata()
        .context("Failed to read the archive size")?
        .len();
    tmp.persist(output)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write archive to {}", output.display()))?;
    Ok(size)
}

/// Disambiguate duplicate folder names deterministically: the second record
/// producing a name gets a `_2` suffix, the third `_3`, and so on, in final
/// sorted order. No record is ever silently overwritten.
fn unique_folder_name(used: &mut HashMap<String, u32>, base: String) -> String {
    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}_{}", base, count)
    }
}

/// Stamp entries with the local time at export, falling back to the ZIP
/// epoch when the clock is outside the DOS datetime range.
fn entry_timestamp() -> zip::DateTime {
    let now = Local::now();
    let year = now.year().clamp(1980, 2107) as u16;
    zip::DateTime::from_date_and_time(
        year,
        now.month() as u8,
        now.day() as u8,
        now.hour() as u8,
        now.minute() as u8,
        now.second() as u8,
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;

    fn read_entry(archive_path: &Path, name: &str) -> Vec<u8> {
        let file = std::fs::File::open(archive_path).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        buf
    }

    fn entry_names(archive_path: &Path) -> Vec<String> {
        let file = std::fs::File::open(archive_path).unwrap();
        let zip = zip::ZipArchive::new(file).unwrap();
        zip.file_names().map(String::from).collect()
    }

    #[test]
    fn archive_contains_indexes_and_record_folder() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");
        let records = vec![Record::new(json!({
            "seq": 1,
            "url": "https://a.test/api",
            "method": "GET",
            "status": 200,
            "mimeType": "application/json",
            "responseBodyRaw": "eyJvayI6dHJ1ZX0=",
            "responseBodyEncoding": "base64",
        }))];

        write_archive(&records, &output).unwrap();

        let names = entry_names(&output);
        assert!(names.contains(&"README.md".to_string()));
        assert!(names.contains(&"index.csv".to_string()));
        assert!(names.contains(&"index.md".to_string()));
        assert!(names.contains(&"00001__GET__a.test_api/00-meta.txt".to_string()));

        let body = read_entry(&output, "00001__GET__a.test_api/04-response-body.json");
        assert_eq!(body, b"{\"ok\":true}");

        let meta = String::from_utf8(read_entry(
            &output,
            "00001__GET__a.test_api/00-meta.txt",
        ))
        .unwrap();
        assert!(meta.contains("Category: xhr"));
    }

    #[test]
    fn colliding_folder_names_get_numeric_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");
        // Same seq, same sanitized name after the query strings are dropped.
        let records = vec![
            Record::new(json!({"seq": 3, "url": "https://a.test/api?x=1", "responseBodyRaw": "one"})),
            Record::new(json!({"seq": 3, "url": "https://a.test/api?x=2", "responseBodyRaw": "two"})),
        ];

        write_archive(&records, &output).unwrap();

        let one = read_entry(&output, "00003__GET__a.test_api/04-response-body.txt");
        let two = read_entry(&output, "00003__GET__a.test_api_2/04-response-body.txt");
        assert_eq!(one, b"one");
        assert_eq!(two, b"two");
    }

    #[test]
    fn unique_folder_name_counts_per_base() {
        let mut used = HashMap::new();
        assert_eq!(unique_folder_name(&mut used, "x".to_string()), "x");
        assert_eq!(unique_folder_name(&mut used, "x".to_string()), "x_2");
        assert_eq!(unique_folder_name(&mut used, "x".to_string()), "x_3");
        assert_eq!(unique_folder_name(&mut used, "y".to_string()), "y");
    }

    #[test]
    fn request_side_entries_use_header_extension() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");
        let records = vec![Record::new(json!({
            "seq": 1,
            "url": "https://a.test/submit",
            "method": "POST",
            "requestHeaders": [{"name": "Content-Type", "value": "application/json"}],
            "requestBodyText": "{\"user\":\"x\"}",
        }))];

        write_archive(&records, &output).unwrap();

        let body = read_entry(&output, "00001__POST__a.test_submit/02-request-body.json");
        assert_eq!(body, b"{\"user\":\"x\"}");
        let headers = read_entry(
            &output,
            "00001__POST__a.test_submit/01-request-headers.txt",
        );
        assert_eq!(headers, b"Content-Type: application/json");
    }
}
