//! Core pipeline for exporting captured request/response records.
//!
//! The input is a JSON capture file as produced by a browser traffic logger:
//! a list of loosely-shaped request/response objects. The pipeline wraps each
//! object in a default-safe [`record::Record`] view, classifies it into one of
//! a fixed set of content kinds, applies the run's filters, and renders the
//! survivors into a readable ZIP archive with one folder per request plus two
//! global index files.
//!
//! Data flows one way: raw records → [`record`] → [`filter`] → [`archive`].
//! Per-record anomalies (malformed fields, undecodable bodies) are absorbed
//! into defaults and never abort a run; only whole-run preconditions are
//! fatal (see [`error::ExportError`]).

pub mod archive;
pub mod config;
pub mod error;
pub mod filter;
pub mod record;

pub use config::Config;
pub use error::ExportError;
