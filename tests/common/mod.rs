//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Oid, Repository, Signature};

/// Regex for the commit message header line.
pub const HEADER_PATTERN: &str = r"^Auto-commit: \d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}$";

/// A test git repository builder for integration tests.
pub struct TestRepo {
    /// Keeps the backing directory alive when the repo owns it.
    _dir: Option<tempfile::TempDir>,
    /// Bare remote, if one was attached.
    _remote: Option<tempfile::TempDir>,
    pub path: PathBuf,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one initial commit in a fresh temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = dir.path().to_path_buf();
        let mut test_repo = Self::init_at(&path);
        test_repo._dir = Some(dir);
        test_repo
    }

    /// Create a repository with one initial commit at `path`.
    pub fn init_at(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repo dir");
        let repo = Repository::init(path).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config.set_bool("commit.gpgsign", false).expect("Failed to set gpgsign");
        }

        let test_repo = Self {
            _dir: None,
            _remote: None,
            path: path.to_path_buf(),
            repo,
        };
        test_repo.write("README.md", "# test\n");
        test_repo.commit_all("initial commit");
        test_repo
    }

    /// Attach a bare `origin` remote and push the current branch with upstream tracking.
    pub fn with_remote(mut self) -> Self {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");

        self.repo
            .remote(
                "origin",
                remote_dir.path().to_str().expect("Invalid remote path"),
            )
            .expect("Failed to add origin remote");

        self.git(&["push", "--quiet", "-u", "origin", "HEAD"]);
        self._remote = Some(remote_dir);
        self
    }

    /// Run the git CLI in this repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        let file = self.path.join(name);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(file, content).expect("Failed to write file");
    }

    /// Stage everything and commit with git2, bypassing the tool under test.
    pub fn commit_all(&self, message: &str) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let sig =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    pub fn head_oid(&self) -> Oid {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.id())
            .expect("Failed to resolve HEAD")
    }

    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or("").to_string())
            .expect("Failed to resolve HEAD")
    }

    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.count()
    }

    /// Commit id of `origin/<current branch>` as seen by the remote itself.
    pub fn remote_head(&self) -> String {
        let branch = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]);
        self.git(&["ls-remote", "origin", &format!("refs/heads/{}", branch.trim())])
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Whether the index matches HEAD (nothing staged).
    pub fn staging_area_is_empty(&self) -> bool {
        self.git(&["diff", "--cached", "--name-only"]).trim().is_empty()
    }

    pub fn tracked_files(&self) -> Vec<String> {
        self.git(&["ls-files"]).lines().map(String::from).collect()
    }
}
