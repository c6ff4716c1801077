//! CLI entry point for reqres-export.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use commands::export::ExportArgs;

/// Export captured request/response records into a readable ZIP archive.
#[derive(Debug, Parser)]
#[command(name = "reqres-export", version)]
struct Cli {
    /// JSON capture file produced by the traffic logger
    #[arg(required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Archive output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Kinds to include: xhr js css img media font doc ws wasm manifest other
    #[arg(long, value_name = "KIND", num_args = 0..)]
    kinds: Vec<String>,

    /// Exclude data: URLs from the export
    #[arg(long)]
    hide_data_url: bool,

    /// Case-insensitive substring filter
    #[arg(long, value_name = "TEXT", default_value = "")]
    text: String,

    /// Limit on the number of exported records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(input) = cli.input else {
        // Unreachable: clap requires input unless --completions is present.
        eprintln!("Error: missing input file");
        return ExitCode::FAILURE;
    };

    let args = ExportArgs {
        input,
        output: cli.output,
        kinds: cli.kinds,
        hide_data_url: cli.hide_data_url,
        text: cli.text,
        limit: cli.limit,
    };

    match commands::export::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
