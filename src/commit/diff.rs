//! Parsing of `git diff --cached --name-status` output.

use std::fmt;

use tracing::warn;

/// Status of a changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
        }
    }
}

/// A file that was changed in the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: FileStatus,
    /// Old path for renamed files (None for non-rename changes).
    pub old_path: Option<String>,
}

impl ChangedFile {
    fn single(status: FileStatus, path: &str) -> Self {
        Self {
            path: path.to_string(),
            status,
            old_path: None,
        }
    }
}

/// Parse name-status output into change records.
///
/// Each line is `<status>\t<path>` or, for renames and copies,
/// `<status><score>\t<old>\t<new>`. Copies are recorded as additions of the
/// new path. Type changes, unmerged entries and unknown codes are skipped.
pub fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ChangedFile> {
    if line.trim().is_empty() {
        return None;
    }

    let mut parts = line.split('\t');
    let status = parts.next()?;
    let first = parts.next();
    let second = parts.next();

    let record = match (status.chars().next()?, first, second) {
        ('A', Some(path), _) => ChangedFile::single(FileStatus::Added, path),
        ('M', Some(path), _) => ChangedFile::single(FileStatus::Modified, path),
        ('D', Some(path), _) => ChangedFile::single(FileStatus::Deleted, path),
        ('R', Some(old), Some(new)) => ChangedFile {
            path: new.to_string(),
            status: FileStatus::Renamed,
            old_path: Some(old.to_string()),
        },
        ('C', Some(_), Some(new)) => ChangedFile::single(FileStatus::Added, new),
        _ => {
            warn!("Skipping unsupported name-status line: {line:?}");
            return None;
        }
    };

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::Added.to_string(), "Added");
        assert_eq!(FileStatus::Modified.to_string(), "Modified");
        assert_eq!(FileStatus::Deleted.to_string(), "Deleted");
        assert_eq!(FileStatus::Renamed.to_string(), "Renamed");
    }

    #[test]
    fn test_parse_single_path_statuses() {
        let files = parse_name_status("A\tnew.txt\nM\tsrc/lib.rs\nD\told.txt\n");
        assert_eq!(
            files,
            vec![
                ChangedFile::single(FileStatus::Added, "new.txt"),
                ChangedFile::single(FileStatus::Modified, "src/lib.rs"),
                ChangedFile::single(FileStatus::Deleted, "old.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_rename_with_score() {
        let files = parse_name_status("R100\ta.txt\tb.txt\n");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, FileStatus::Renamed);
        assert_eq!(files[0].path, "b.txt");
        assert_eq!(files[0].old_path.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_parse_copy_counts_as_added() {
        let files = parse_name_status("C075\tsrc/a.rs\tsrc/b.rs");
        assert_eq!(files, vec![ChangedFile::single(FileStatus::Added, "src/b.rs")]);
    }

    #[test]
    fn test_parse_skips_blank_and_unknown_lines() {
        let files = parse_name_status("\nT\tlink\nU\tconflict.txt\nM\tkept.txt\n\n");
        assert_eq!(files, vec![ChangedFile::single(FileStatus::Modified, "kept.txt")]);
    }

    #[test]
    fn test_parse_rename_missing_new_path_is_skipped() {
        assert!(parse_name_status("R090\tonly-old.txt").is_empty());
    }

    #[test]
    fn test_parse_paths_with_spaces() {
        let files = parse_name_status("A\tdocs/read me.md");
        assert_eq!(files[0].path, "docs/read me.md");
    }
}
