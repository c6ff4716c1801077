//! Command handlers for the CLI binary.

pub mod export;
