//! Error types for autopush modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the git CLI.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found. Install git or set AUTOPUSH_GIT to its path")]
    NotInstalled(String),

    #[error("Failed to spawn git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
            .code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from scanning a root path for repositories.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("{} isn't a directory or does not exist", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to query status of {}: {source}", .repo.display())]
    Status {
        repo: PathBuf,
        #[source]
        source: GitError,
    },
}

/// Step of the commit sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStep {
    ListIgnored,
    Untrack,
    Reset,
    Stage,
    Diff,
    Commit,
    Push,
}

impl CommitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitStep::ListIgnored => "list ignored files",
            CommitStep::Untrack => "untrack ignored files",
            CommitStep::Reset => "reset staging area",
            CommitStep::Stage => "stage changes",
            CommitStep::Diff => "read staged diff",
            CommitStep::Commit => "commit",
            CommitStep::Push => "push",
        }
    }
}

impl std::fmt::Display for CommitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the auto-commit sequence of a single repository.
#[derive(Error, Debug)]
#[error("Failed to {step} in {}: {source}", .repo.display())]
pub struct CommitError {
    pub repo: PathBuf,
    pub step: CommitStep,
    #[source]
    pub source: GitError,
}

impl CommitError {
    pub fn new(repo: impl Into<PathBuf>, step: CommitStep, source: GitError) -> Self {
        Self {
            repo: repo.into(),
            step,
            source,
        }
    }
}
