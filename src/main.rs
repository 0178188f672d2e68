use std::path::PathBuf;

use clap::{ArgAction, Parser};
use vulnsweep::commands::execute_sweep;
use vulnsweep::commands::sweep::SweepOptions;
use vulnsweep::config::Config;
use vulnsweep::error::AppError;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let overrides = Config {
        runtime: cli.runtime,
        scanner: cli.scanner,
        remove_subcommand: None,
        timeout_secs: cli.timeout,
    };
    let config = Config::load(cli.config.as_deref())?.merge(overrides);

    let options = SweepOptions { input: cli.file, config, verbose: cli.verbose };
    execute_sweep(options)?;

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "vulnsweep",
    version,
    about = "Pull container images and summarize their vulnerabilities by severity."
)]
struct Cli {
    /// Text file with one `label: image[:tag]` entry per line.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Container runtime binary used to pull and remove images (default: docker).
    #[arg(long = "runtime", value_name = "BIN")]
    runtime: Option<String>,

    /// Vulnerability scanner binary (default: grype).
    #[arg(long = "scanner", value_name = "BIN")]
    scanner: Option<String>,

    /// Kill any runtime or scanner invocation that runs longer than this.
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    /// Read settings from this file instead of the default config location.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Echo each external command and print report details.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}
