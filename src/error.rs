//! Fatal error taxonomy for an export run.

/// Whole-run preconditions that abort an export before any output is written.
///
/// Per-record anomalies never show up here: malformed fields collapse to
/// typed defaults and undecodable base64 bodies become empty byte sequences.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The top-level input JSON is not one of the accepted shapes
    /// (array, `{"entries": [...]}`, `{"records": [...]}`, or a single object).
    #[error("Input JSON must be a list of records or an object containing 'entries' or 'records'")]
    InvalidShape,

    /// Filtering left nothing to export; the archive must not be written.
    #[error("No records matched the provided filters")]
    NoRecordsMatched,
}
