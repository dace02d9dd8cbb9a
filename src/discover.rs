//! Repository discovery: find every working tree beneath a root directory
//! and check which of them have pending changes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::DiscoveryError;
use crate::git::{GitExecutor, repo_has_changes};

/// Name of the git metadata directory that marks a working tree root.
pub const GIT_DIR: &str = ".git";

/// Pending-change state of a discovered repository.
#[derive(Debug)]
pub enum RepoState {
    /// `git status --porcelain` reported at least one entry.
    Dirty,
    /// Nothing to commit.
    Clean,
    /// The status query itself failed.
    Unreadable(DiscoveryError),
}

/// A repository found during a scan.
#[derive(Debug)]
pub struct RepoScan {
    pub root: PathBuf,
    pub state: RepoState,
}

impl RepoScan {
    pub fn has_changes(&self) -> bool {
        matches!(self.state, RepoState::Dirty)
    }
}

/// Resolve a command-line path argument to an absolute path.
///
/// Symlinks are resolved when the path exists; otherwise the path is made
/// absolute against the current directory so it can still be reported.
pub fn resolve_path(arg: &Path) -> PathBuf {
    std::fs::canonicalize(arg)
        .or_else(|_| std::path::absolute(arg))
        .unwrap_or_else(|_| arg.to_path_buf())
}

/// Find every working tree root at or beneath `root`.
///
/// A directory is a root when it contains a `.git` directory. The walk does
/// not descend into `.git` directories or follow symlinks; unreadable entries
/// are logged and skipped. Roots are returned in file-name order.
pub fn find_repository_roots(root: &Path) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != GIT_DIR);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.path().join(GIT_DIR).is_dir() {
            debug!("Found repository at {}", entry.path().display());
            roots.push(entry.into_path());
        }
    }

    roots
}

/// Scan `root` for repositories and query each one's status.
///
/// Returns [`DiscoveryError::InvalidPath`] when `root` is not an existing
/// directory. Status failures do not abort the scan; they are recorded on
/// the affected repository.
pub fn scan<E: GitExecutor + ?Sized>(
    git: &E,
    root: &Path,
) -> Result<Vec<RepoScan>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::InvalidPath(root.to_path_buf()));
    }

    let scans = find_repository_roots(root)
        .into_iter()
        .map(|repo| {
            let state = match repo_has_changes(git, &repo) {
                Ok(true) => RepoState::Dirty,
                Ok(false) => RepoState::Clean,
                Err(source) => {
                    let err = DiscoveryError::Status {
                        repo: repo.clone(),
                        source,
                    };
                    warn!("{err}");
                    RepoState::Unreadable(err)
                }
            };
            RepoScan { root: repo, state }
        })
        .collect();

    Ok(scans)
}
