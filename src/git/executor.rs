//! Git CLI invocation behind a mockable executor trait.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary with `-C <repo>`, inheriting the user's existing git config, SSH agent,
//! and credential store.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::GitError;

/// Environment variable to override the git executable.
pub const GIT_ENV_VAR: &str = "AUTOPUSH_GIT";

/// Executable used when no override is configured.
const DEFAULT_GIT: &str = "git";

/// The git operations needed to discover and auto-commit a repository.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitExecutor {
    /// `git status --porcelain`: raw porcelain output.
    fn status_porcelain(&self, repo: &Path) -> Result<String, GitError>;

    /// `git ls-files -i --exclude-standard -c`: tracked files that match ignore rules.
    fn list_ignored_tracked(&self, repo: &Path) -> Result<Vec<String>, GitError>;

    /// `git rm --cached --ignore-unmatch`: remove `files` from the index only.
    fn untrack(&self, repo: &Path, files: &[String]) -> Result<(), GitError>;

    /// `git reset`: empty the staging area.
    fn reset(&self, repo: &Path) -> Result<(), GitError>;

    /// `git add --all`: stage every change in the working tree.
    fn stage_all(&self, repo: &Path) -> Result<(), GitError>;

    /// `git diff --cached --name-status`: raw name-status output.
    fn diff_staged(&self, repo: &Path) -> Result<String, GitError>;

    /// `git commit -m <message>`.
    fn commit(&self, repo: &Path, message: &str) -> Result<(), GitError>;

    /// `git push` to the current branch's upstream.
    fn push(&self, repo: &Path) -> Result<(), GitError>;
}

/// Executor that runs the real git CLI.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    /// Use the given executable without verifying it.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the git executable and check that it runs.
    ///
    /// Honors `AUTOPUSH_GIT`, then falls back to `git` on `PATH`.
    pub fn locate() -> Result<Self, GitError> {
        let name = git_program_name();
        let program = which::which(&name).map_err(|_| GitError::NotInstalled(name.clone()))?;

        let version = Command::new(&program)
            .arg("--version")
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: "--version".to_string(),
                source,
            })?;

        if !version.status.success() {
            return Err(GitError::NotInstalled(name));
        }

        debug!(
            "Using {} ({})",
            program.display(),
            String::from_utf8_lossy(&version.stdout).trim()
        );

        Ok(Self { program })
    }

    /// Run `git -C <repo> <args>` and return stdout on success.
    fn run(&self, repo: &Path, args: &[&str], operation: &str) -> Result<String, GitError> {
        self.run_with_input(repo, args, None, operation)
    }

    /// Run `git -C <repo> <args>`, feeding `input` to stdin when given.
    fn run_with_input(
        &self,
        repo: &Path,
        args: &[&str],
        input: Option<&[u8]>,
        operation: &str,
    ) -> Result<String, GitError> {
        debug!("git -C {} {}", repo.display(), args.join(" "));

        let spawn_failed = |source: std::io::Error| GitError::SpawnFailed {
            operation: operation.to_string(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg("-C")
            .arg(repo)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_failed)?;

        // Closing stdin on drop ends the input
        let written = match (input, child.stdin.take()) {
            (Some(bytes), Some(mut stdin)) => stdin.write_all(bytes),
            _ => Ok(()),
        };

        let output = child.wait_with_output().map_err(spawn_failed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr,
            });
        }
        written.map_err(spawn_failed)?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl GitExecutor for SystemGit {
    fn status_porcelain(&self, repo: &Path) -> Result<String, GitError> {
        self.run(repo, &["status", "--porcelain"], "status")
    }

    fn list_ignored_tracked(&self, repo: &Path) -> Result<Vec<String>, GitError> {
        let stdout = self.run(
            repo,
            &["ls-files", "-z", "-i", "--exclude-standard", "-c"],
            "ls-files",
        )?;
        Ok(stdout
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }

    fn untrack(&self, repo: &Path, files: &[String]) -> Result<(), GitError> {
        // Paths go over stdin so a large ignored tree cannot overflow argv
        let mut pathspecs = Vec::new();
        for file in files {
            pathspecs.extend_from_slice(file.as_bytes());
            pathspecs.push(0);
        }
        self.run_with_input(
            repo,
            &[
                "--literal-pathspecs",
                "rm",
                "--cached",
                "--ignore-unmatch",
                "--quiet",
                "--pathspec-from-file=-",
                "--pathspec-file-nul",
            ],
            Some(&pathspecs),
            "rm --cached",
        )
        .map(|_| ())
    }

    fn reset(&self, repo: &Path) -> Result<(), GitError> {
        self.run(repo, &["reset", "--quiet"], "reset").map(|_| ())
    }

    fn stage_all(&self, repo: &Path) -> Result<(), GitError> {
        self.run(repo, &["add", "--all"], "add").map(|_| ())
    }

    fn diff_staged(&self, repo: &Path) -> Result<String, GitError> {
        self.run(repo, &["diff", "--cached", "--name-status"], "diff")
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<(), GitError> {
        self.run(repo, &["commit", "--quiet", "-m", message], "commit")
            .map(|_| ())
    }

    fn push(&self, repo: &Path) -> Result<(), GitError> {
        self.run(repo, &["push", "--quiet"], "push").map(|_| ())
    }
}

/// Name or path of the git executable to use.
///
/// Reads from AUTOPUSH_GIT if set and non-empty, otherwise `git`.
fn git_program_name() -> String {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) => {
            warn!("{} is set but empty, using {}", GIT_ENV_VAR, DEFAULT_GIT);
            DEFAULT_GIT.to_string()
        }
        Err(_) => DEFAULT_GIT.to_string(),
    }
}
