//! Auto-commit of a single repository: untrack ignored files, stage
//! everything, describe the staged diff, then commit and push.

pub mod diff;
pub mod message;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{CommitError, CommitStep, GitError};
use crate::git::GitExecutor;

pub use diff::{ChangedFile, FileStatus, parse_name_status};
pub use message::{ChangeBuckets, CommitMessage};

/// Whether repositories are actually committed and pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Compute and report the message, then leave the staging area empty.
    Dry,
    /// Commit and push.
    Live,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { RunMode::Dry } else { RunMode::Live }
    }

    pub fn is_dry(&self) -> bool {
        matches!(self, RunMode::Dry)
    }
}

/// Result of a successful auto-commit sequence.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub message: CommitMessage,
    /// Tracked files that matched ignore rules and were removed from the index.
    pub untracked: Vec<String>,
    pub mode: RunMode,
}

impl CommitOutcome {
    pub fn committed(&self) -> bool {
        self.mode == RunMode::Live
    }
}

/// Stage all changes in `repo`, build a commit message, and commit + push
/// unless running in dry mode.
///
/// Steps:
/// 1. `git reset` - start from an empty staging area
/// 2. `git ls-files -i --exclude-standard -c` + `git rm --cached` - drop ignored
///    files from the index
/// 3. `git add --all` - stage every change
/// 4. `git diff --cached --name-status` - classify staged changes
/// 5. Dry mode: `git reset` and stop
/// 6. Live mode: `git commit -m <message>` then `git push`
///
/// The reset has to come before the untrack: `git reset` rebuilds the index
/// from HEAD and would put the ignored files back.
///
/// The sequence stops at the first failing command.
pub fn auto_commit<E: GitExecutor + ?Sized>(
    git: &E,
    repo: &Path,
    mode: RunMode,
) -> Result<CommitOutcome, CommitError> {
    let fail = |step: CommitStep| move |e: GitError| CommitError::new(repo, step, e);

    // 1. Empty the staging area
    git.reset(repo).map_err(fail(CommitStep::Reset))?;

    // 2. Untrack files that are now ignored
    let ignored = git
        .list_ignored_tracked(repo)
        .map_err(fail(CommitStep::ListIgnored))?;
    if !ignored.is_empty() {
        info!("{}: untracking ignored files {:?}", repo.display(), ignored);
        git.untrack(repo, &ignored).map_err(fail(CommitStep::Untrack))?;
    }

    // 3. Stage everything
    git.stage_all(repo).map_err(fail(CommitStep::Stage))?;

    // 4. Describe the staged changes
    let name_status = git.diff_staged(repo).map_err(fail(CommitStep::Diff))?;
    let files = parse_name_status(&name_status);
    let changes = ChangeBuckets::classify(&files);
    debug!(
        "{}: {} added, {} modified, {} deleted",
        repo.display(),
        changes.added.len(),
        changes.modified.len(),
        changes.deleted.len()
    );
    let message = CommitMessage::now(changes);

    // 5. Dry mode leaves history alone and the index empty
    if mode.is_dry() {
        git.reset(repo).map_err(fail(CommitStep::Reset))?;
        return Ok(CommitOutcome {
            message,
            untracked: ignored,
            mode,
        });
    }

    // 6. Commit and push the current branch
    git.commit(repo, &message.format())
        .map_err(fail(CommitStep::Commit))?;
    git.push(repo).map_err(fail(CommitStep::Push))?;

    Ok(CommitOutcome {
        message,
        untracked: ignored,
        mode,
    })
}
