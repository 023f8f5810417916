//! Feed list configuration (`feeds.conf`): one URL per line.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Error loading the feed list. Missing file is its own variant because the
/// CLI maps it to exit status 1 (without at least one feed there is nothing
/// to do); everything else is an ordinary I/O failure.
#[derive(Debug)]
pub enum FeedsError {
    Missing(PathBuf),
    Io(PathBuf, std::io::Error),
}

impl fmt::Display for FeedsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedsError::Missing(path) => {
                write!(f, "missing feeds configuration file {}", path.display())
            }
            FeedsError::Io(path, e) => {
                write!(f, "failed to read feeds file {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for FeedsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedsError::Missing(_) => None,
            FeedsError::Io(_, e) => Some(e),
        }
    }
}

/// Read the configured feed URLs. Lines not starting with `http` (comments,
/// blanks, editor noise) are ignored.
pub fn load_feeds(path: &Path) -> Result<Vec<String>, FeedsError> {
    let data = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FeedsError::Missing(path.to_path_buf()),
        _ => FeedsError::Io(path.to_path_buf(), e),
    })?;
    Ok(parse_feed_lines(&data))
}

fn parse_feed_lines(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http"))
        .map(String::from)
        .collect()
}
