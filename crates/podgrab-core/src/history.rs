//! Persisted record of already-downloaded enclosure URLs.
//!
//! Flat newline-delimited file under the config dir. Loaded once at start,
//! used for membership tests while feeds are processed, appended to at the
//! end of a run. Entries are never removed, so the set grows monotonically
//! across runs.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// In-memory set of enclosure URLs that have already been queued for
/// download in this or any previous run.
#[derive(Debug, Default)]
pub struct History {
    seen: HashSet<String>,
}

impl History {
    /// Load from `path`. A missing file means "first run" and yields an
    /// empty set; blank lines are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read history file {}", path.display()))
            }
        };
        let seen = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Ok(Self { seen })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Record `url`; returns false if it was already present.
    pub fn insert(&mut self, url: String) -> bool {
        self.seen.insert(url)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// How [`persist`] writes to the history file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Normal flow: add this run's URLs without touching earlier entries,
    /// so an interrupted previous run never loses accumulated history.
    Append,
    /// Replace the whole file. Only for the alternate rewrite flow.
    Overwrite,
}

/// Write `urls` newline-joined to `path`, creating parent directories as
/// needed. Writing an empty list is a no-op so a run with nothing new never
/// touches the file.
pub fn persist(path: &Path, urls: &[String], mode: PersistMode) -> Result<()> {
    if urls.is_empty() && mode == PersistMode::Append {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut body = urls.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    use std::io::Write;
    let mut file = match mode {
        PersistMode::Append => fs::OpenOptions::new().create(true).append(true).open(path),
        PersistMode::Overwrite => fs::File::create(path),
    }
    .with_context(|| format!("failed to open history file {}", path.display()))?;
    file.write_all(body.as_bytes())
        .with_context(|| format!("failed to write history file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::load(&dir.path().join("history")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "http://a/1.mp3\n\n  \nhttp://b/2.mp3\n").unwrap();
        let history = History::load(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.contains("http://a/1.mp3"));
        assert!(history.contains("http://b/2.mp3"));
        assert!(!history.contains(""));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut history = History::default();
        assert!(history.insert("http://a/1.mp3".into()));
        assert!(!history.insert("http://a/1.mp3".into()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn persist_append_keeps_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        persist(&path, &["http://a/1.mp3".into()], PersistMode::Append).unwrap();
        persist(&path, &["http://b/2.mp3".into()], PersistMode::Append).unwrap();
        let history = History::load(&path).unwrap();
        assert!(history.contains("http://a/1.mp3"));
        assert!(history.contains("http://b/2.mp3"));
    }

    #[test]
    fn persist_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        persist(&path, &["http://a/1.mp3".into()], PersistMode::Append).unwrap();
        persist(&path, &["http://b/2.mp3".into()], PersistMode::Overwrite).unwrap();
        let history = History::load(&path).unwrap();
        assert!(!history.contains("http://a/1.mp3"));
        assert!(history.contains("http://b/2.mp3"));
    }

    #[test]
    fn persist_empty_append_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        persist(&path, &[], PersistMode::Append).unwrap();
        assert!(!path.exists());
    }
}
