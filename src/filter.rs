//! Record filtering and ordering.
//!
//! A record survives only if every active criterion holds. The result is
//! sorted ascending by `(seq, url)` and optionally truncated, which fixes the
//! final order of the archive.

use tracing::debug;

use crate::record::{classify, Kind, Record};

/// Filter criteria for one export run.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Kinds to keep; an empty list keeps every kind.
    pub kinds: Vec<Kind>,
    /// Drop records whose URL is a `data:` URL.
    pub hide_data_url: bool,
    /// Lower-cased substring matched against URL, MIME type, method, status
    /// and both body texts. Empty matches everything.
    pub text: String,
    /// Cap applied after sorting.
    pub limit: Option<usize>,
}

impl Filter {
    /// Apply the filter and return the survivors sorted by `(seq, url)`.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut kept: Vec<Record> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        kept.sort_by(|a, b| a.seq().cmp(&b.seq()).then_with(|| a.url().cmp(&b.url())));
        if let Some(limit) = self.limit {
            kept.truncate(limit);
        }
        debug!(kept = kept.len(), "filter applied");
        kept
    }

    fn matches(&self, record: &Record) -> bool {
        if self.hide_data_url && record.url().starts_with("data:") {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&classify(record)) {
            return false;
        }
        if !self.text.is_empty() {
            let status = record
                .status()
                .map(|s| s.to_string())
                .unwrap_or_default();
            let blob = [
                record.url(),
                record.mime_type(),
                record.method(),
                status,
                record.request_body_text(),
                record.response_body_raw().unwrap_or_default(),
            ]
            .join(" ")
            .to_lowercase();
            if !blob.contains(&self.text) {
                return false;
            }
        }
        true
    }
}
