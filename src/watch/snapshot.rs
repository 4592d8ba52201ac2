//! Point-in-time directory listings and the additions diff.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// The set of plain-file names observed in a directory at one poll.
///
/// Names keep the order the directory iterator produced them in; the diff
/// reports additions in that order. A snapshot is taken fresh each poll
/// and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    names: Vec<String>,
}

impl Snapshot {
    /// List the plain files in `dir`. Directories and other non-file
    /// entries are excluded. An unreadable or missing directory is an
    /// error for the caller; it is not handled here.
    pub async fn scan(dir: &Path) -> io::Result<Self> {
        let mut names = Vec::new();

        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            let metadata = match tokio::fs::metadata(&path).await {
                Ok(m) => m,
                Err(_) => continue,
            };

            if !metadata.is_file() {
                continue;
            }

            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(Self { names })
    }

    /// Build a snapshot from bare names (no filesystem involved).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Names present in `current` but not in `previous`, in `current`'s order.
///
/// Additions only: files deleted between polls do not appear and are never
/// reprocessed.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Vec<String> {
    let seen: HashSet<&str> = previous.names.iter().map(String::as_str).collect();

    current
        .names
        .iter()
        .filter(|name| !seen.contains(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn scan_lists_plain_files_only() {
        let temp = TempDir::new().unwrap();

        tokio::fs::write(temp.path().join("one.wav"), b"a").await.unwrap();
        tokio::fs::write(temp.path().join("two.txt"), b"b").await.unwrap();
        tokio::fs::create_dir(temp.path().join("nested")).await.unwrap();

        let snapshot = Snapshot::scan(temp.path()).await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("one.wav"));
        assert!(snapshot.contains("two.txt"));
        assert!(!snapshot.contains("nested"));
    }

    #[tokio::test]
    async fn scan_fails_on_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("not-here");

        assert!(Snapshot::scan(&missing).await.is_err());
    }

    #[test]
    fn diff_reports_additions_in_current_order() {
        let previous = Snapshot::from_names(["a.wav", "b.wav"]);
        let current = Snapshot::from_names(["b.wav", "c.wav", "a.wav", "d.wav"]);

        assert_eq!(diff(&previous, &current), vec!["c.wav", "d.wav"]);
    }

    #[test]
    fn diff_is_empty_when_nothing_changed() {
        let previous = Snapshot::from_names(["a.wav", "b.wav"]);
        let current = previous.clone();

        assert!(diff(&previous, &current).is_empty());
    }

    #[test]
    fn deletions_are_invisible() {
        let previous = Snapshot::from_names(["a.wav", "b.wav"]);
        let current = Snapshot::from_names(["b.wav"]);

        assert!(diff(&previous, &current).is_empty());
    }

    #[test]
    fn diff_of_empty_previous_is_everything() {
        let previous = Snapshot::default();
        let current = Snapshot::from_names(["a.wav"]);

        assert_eq!(diff(&previous, &current), vec!["a.wav"]);
    }
}
