//! Export command: load, filter, and write the archive.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use humansize::{format_size, DECIMAL};
use tracing::warn;

use reqres_export::archive;
use reqres_export::filter::Filter;
use reqres_export::record::{self, Kind};
use reqres_export::{Config, ExportError};

/// Resolved command-line arguments for one export run.
pub struct ExportArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub kinds: Vec<String>,
    pub hide_data_url: bool,
    pub text: String,
    pub limit: Option<usize>,
}

/// Run the whole pipeline and print the one-line summary.
pub fn run(args: ExportArgs) -> Result<()> {
    // An unreadable config file should not block an export.
    let config = Config::load().unwrap_or_else(|err| {
        warn!("{err:#}");
        Config::default()
    });

    let kind_names = if args.kinds.is_empty() {
        config.kinds.clone()
    } else {
        args.kinds
    };
    let kinds = parse_kinds(&kind_names)?;
    let output = args.output.unwrap_or(config.output);
    let hide_data_url = args.hide_data_url || config.hide_data_url;

    let records = record::load_records(&args.input)?;
    let filter = Filter {
        kinds,
        hide_data_url,
        text: args.text.trim().to_lowercase(),
        limit: args.limit,
    };
    let selected = filter.apply(records);
    if selected.is_empty() {
        return Err(ExportError::NoRecordsMatched.into());
    }

    let size = archive::write_archive(&selected, &output)?;
    println!(
        "Wrote {} record(s) to {} ({})",
        selected.len(),
        output.display(),
        format_size(size, DECIMAL)
    );
    Ok(())
}

fn parse_kinds(names: &[String]) -> Result<Vec<Kind>> {
    names
        .iter()
        .map(|name| {
            Kind::from_name(&name.to_lowercase())
                .ok_or_else(|| anyhow!("Unknown kind: {name}"))
        })
        .collect()
}
