//! Git operations via the system git CLI.

pub mod executor;
pub mod status;

pub use executor::{GIT_ENV_VAR, GitExecutor, SystemGit};
pub use status::{has_pending_changes, repo_has_changes};
