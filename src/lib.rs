//! autopush - A CLI tool that auto-commits and pushes every git repository
//! with pending changes under a set of directories.
//!
//! # Overview
//!
//! autopush walks each given directory for git working trees, checks which
//! have uncommitted changes, stages everything, describes the staged diff in a
//! timestamped commit message, then commits and pushes. In dry-run mode it
//! only prints the message it would use and leaves the staging area empty.

pub mod commit;
pub mod discover;
pub mod error;
pub mod git;
pub mod logging;
pub mod run;

// Re-export commonly used types
pub use commit::{ChangeBuckets, CommitMessage, CommitOutcome, RunMode, auto_commit};
pub use discover::{RepoScan, RepoState, find_repository_roots, scan};
pub use error::{CommitError, CommitStep, DiscoveryError, GitError};
pub use git::{GitExecutor, SystemGit};
pub use run::{RunReport, run};
