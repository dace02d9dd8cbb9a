//! autopush - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use autopush::{RunMode, SystemGit, logging, run};

/// Auto-commit and push every git repository with pending changes.
#[derive(Parser, Debug)]
#[command(name = "autopush")]
#[command(about = "Auto-commit and push every git repository with pending changes")]
#[command(version)]
#[command(after_help = "Example:\n    autopush /home/user/projects --dry-run")]
struct Cli {
    /// Directories to search for git repositories
    paths: Vec<PathBuf>,

    /// Show which commits would be made, but do not commit or push
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Print diagnostic logs to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Exit with status 1 if any repository failed to commit or push
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<ExitCode> {
    // No arguments: show usage and do nothing
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        // Help, or anything clap rejects, falls back to usage
        Err(_) => {
            Cli::command().print_help()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    logging::init(cli.verbose);

    let git = SystemGit::locate().context("git is required to run autopush")?;
    let mode = RunMode::from_dry_run(cli.dry_run);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run(&git, &cli.paths, mode, &mut out).context("Failed to write output")?;

    if cli.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
