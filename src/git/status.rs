//! Interpretation of `git status --porcelain` output.

use std::path::Path;

use tracing::debug;

use crate::error::GitError;
use crate::git::executor::GitExecutor;

/// Whether porcelain status output reports any pending change.
///
/// Any non-blank output counts: tracked modifications, additions, deletions,
/// and untracked files that are not ignored all produce a line.
pub fn has_pending_changes(porcelain: &str) -> bool {
    !porcelain.trim().is_empty()
}

/// Number of entries in porcelain status output.
pub fn pending_entry_count(porcelain: &str) -> usize {
    porcelain.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Query a repository's status and report whether it has pending changes.
pub fn repo_has_changes<E: GitExecutor + ?Sized>(git: &E, repo: &Path) -> Result<bool, GitError> {
    let porcelain = git.status_porcelain(repo)?;
    debug!(
        "{}: {} pending status entries",
        repo.display(),
        pending_entry_count(&porcelain)
    );
    Ok(has_pending_changes(&porcelain))
}
