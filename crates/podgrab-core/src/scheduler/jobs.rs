//! Job list construction: destination folders, metadata, history recording.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use std::fs;
use std::path::{Path, PathBuf};

use crate::feed::FeedResult;
use crate::history::History;

/// Metadata file written into a newly created podcast folder, holding the
/// originating feed URL.
pub const FEED_URL_FILE: &str = "feed.url";

/// One queued download: enclosure URL plus its destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub dest_dir: PathBuf,
}

/// Build the flat job list from all feed results.
///
/// Ensures each destination folder exists (a pre-existing folder is not an
/// error) and writes [`FEED_URL_FILE`] into folders created here. Every URL
/// is recorded into `history` as it is enqueued, so a run counts as
/// attempted even when a transfer later fails; the returned second vector
/// holds the freshly recorded URLs for the final history append.
pub fn prepare_jobs(
    results: &[FeedResult],
    download_root: &Path,
    history: &mut History,
) -> Result<(Vec<Job>, Vec<String>)> {
    fs::create_dir_all(download_root)
        .with_context(|| format!("failed to create {}", download_root.display()))?;

    let mut jobs = Vec::new();
    let mut enqueued = Vec::new();
    for result in results {
        let dir = download_root.join(&result.dir_name);
        let newly_created = !dir.exists();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        if newly_created {
            fs::write(dir.join(FEED_URL_FILE), format!("{}\n", result.feed_url))
                .with_context(|| format!("failed to write feed metadata in {}", dir.display()))?;
        }
        for url in &result.new_urls {
            if history.insert(url.clone()) {
                enqueued.push(url.clone());
            }
            jobs.push(Job {
                url: url.clone(),
                dest_dir: dir.clone(),
            });
        }
    }
    Ok((jobs, enqueued))
}

/// Randomize dispatch order. Consecutive jobs in the flattened list share an
/// origin host (all episodes of one feed); shuffling spreads the concurrent
/// load across hosts instead of hammering one server.
pub fn shuffle_jobs(jobs: &mut [Job]) {
    jobs.shuffle(&mut rand::thread_rng());
}
