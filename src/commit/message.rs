//! Commit message composition from classified staged changes.

use chrono::{DateTime, Local, TimeZone};

use crate::commit::diff::{ChangedFile, FileStatus};

/// Timestamp layout of the message header: `DD-MM-YYYY HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Prefix of the message header line.
pub const HEADER_PREFIX: &str = "Auto-commit:";

/// Staged files grouped by how they appear in the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBuckets {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeBuckets {
    /// Sort change records into buckets, preserving diff order.
    ///
    /// A rename lands twice: its old path in `deleted` and its new path in
    /// `added`.
    pub fn classify(files: &[ChangedFile]) -> Self {
        let mut buckets = Self::default();
        for file in files {
            match file.status {
                FileStatus::Added => buckets.added.push(file.path.clone()),
                FileStatus::Modified => buckets.modified.push(file.path.clone()),
                FileStatus::Deleted => buckets.deleted.push(file.path.clone()),
                FileStatus::Renamed => {
                    if let Some(ref old) = file.old_path {
                        buckets.deleted.push(old.clone());
                    }
                    buckets.added.push(file.path.clone());
                }
            }
        }
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }
}

/// An auto-generated commit message.
#[derive(Debug, Clone)]
pub struct CommitMessage {
    pub timestamp: String,
    pub changes: ChangeBuckets,
}

impl CommitMessage {
    /// Build a message stamped with the current local time.
    pub fn now(changes: ChangeBuckets) -> Self {
        Self::at(&Local::now(), changes)
    }

    /// Build a message stamped with the given time.
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>, changes: ChangeBuckets) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            changes,
        }
    }

    /// Format the commit message for git.
    ///
    /// Produces:
    /// ```text
    /// Auto-commit: 19-10-2026 14:03:09
    /// Added:    b.txt, x.txt
    /// Modified: src/lib.rs
    /// Deleted:  a.txt
    /// ```
    ///
    /// Summary lines for empty buckets are omitted.
    pub fn format(&self) -> String {
        let mut lines = vec![format!("{} {}", HEADER_PREFIX, self.timestamp)];

        let sections = [
            ("Added:    ", &self.changes.added),
            ("Modified: ", &self.changes.modified),
            ("Deleted:  ", &self.changes.deleted),
        ];
        for (label, files) in sections {
            if !files.is_empty() {
                lines.push(format!("{}{}", label, files.join(", ")));
            }
        }

        lines.join("\n")
    }
}

impl std::fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}
