//! Driver flow: scan every supplied path, then auto-commit each repository
//! with pending changes, reporting one status block per repository.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::commit::{RunMode, auto_commit};
use crate::discover::{RepoState, resolve_path, scan};
use crate::git::GitExecutor;

/// Line printed after every repository's status.
pub const SEPARATOR: &str = "==============================================";

/// Printed when no repository with pending changes was found.
pub const NO_CHANGES: &str = "No changes found in any repository.";

/// What happened to each path and repository during a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub invalid_paths: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
    pub committed: Vec<PathBuf>,
    pub previewed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Repositories that were handed to the committer.
    pub fn processed(&self) -> usize {
        self.committed.len() + self.previewed.len() + self.failed.len()
    }
}

/// Run the whole flow over `paths`.
///
/// All paths are scanned before any repository is committed, so a bad path
/// never prevents the others from being processed.
pub fn run<E: GitExecutor + ?Sized, W: Write>(
    git: &E,
    paths: &[PathBuf],
    mode: RunMode,
    out: &mut W,
) -> io::Result<RunReport> {
    let mut report = RunReport::default();

    let repos = discover_all(git, paths, out, &mut report)?;

    if repos.is_empty() {
        writeln!(out, "{NO_CHANGES}")?;
        return Ok(report);
    }

    info!("{} repositories with pending changes", repos.len());
    commit_all(git, &repos, mode, out, &mut report)?;

    Ok(report)
}

/// Scan each path and collect the repositories with pending changes, in
/// discovery order. A repository reachable from several paths is listed once.
pub fn discover_all<E: GitExecutor + ?Sized, W: Write>(
    git: &E,
    paths: &[PathBuf],
    out: &mut W,
    report: &mut RunReport,
) -> io::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut repos = Vec::new();

    for arg in paths {
        let root = resolve_path(arg);
        let scans = match scan(git, &root) {
            Ok(scans) => scans,
            Err(e) => {
                writeln!(out, "{e}")?;
                report.invalid_paths.push(root);
                continue;
            }
        };

        for found in scans {
            if !seen.insert(found.root.clone()) {
                continue;
            }

            match found.state {
                RepoState::Dirty => {
                    writeln!(out, "repo {} added.", found.root.display())?;
                    repos.push(found.root);
                }
                RepoState::Clean => {
                    writeln!(out, "repo {} no changes. Skipping.", found.root.display())?;
                    report.skipped.push(found.root);
                }
                RepoState::Unreadable(e) => {
                    writeln!(out, "repo {} skipped: {}", found.root.display(), e)?;
                    report.unreadable.push(found.root);
                }
            }
            writeln!(out, "{SEPARATOR}")?;
        }
    }

    Ok(repos)
}

/// Auto-commit every repository in order. A failure is reported and the
/// next repository is processed.
pub fn commit_all<E: GitExecutor + ?Sized, W: Write>(
    git: &E,
    repos: &[PathBuf],
    mode: RunMode,
    out: &mut W,
    report: &mut RunReport,
) -> io::Result<()> {
    for repo in repos {
        commit_one(git, repo, mode, out, report)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

fn commit_one<E: GitExecutor + ?Sized, W: Write>(
    git: &E,
    repo: &Path,
    mode: RunMode,
    out: &mut W,
    report: &mut RunReport,
) -> io::Result<()> {
    if mode.is_dry() {
        writeln!(out, "[dry-run] repo {}", repo.display())?;
    } else {
        writeln!(out, "repo {}", repo.display())?;
    }

    match auto_commit(git, repo, mode) {
        Ok(outcome) => {
            if !outcome.untracked.is_empty() {
                writeln!(out, "untracked ignored files: {}", outcome.untracked.join(", "))?;
            }
            writeln!(out, "{}", outcome.message)?;

            if outcome.committed() {
                writeln!(out, "repo {} committed and pushed", repo.display())?;
                report.committed.push(repo.to_path_buf());
            } else {
                writeln!(out, "repo {} dry run, nothing committed", repo.display())?;
                report.previewed.push(repo.to_path_buf());
            }
        }
        Err(e) => {
            writeln!(out, "repo {} commit error: {}", repo.display(), e)?;
            report.failed.push(repo.to_path_buf());
        }
    }

    Ok(())
}
