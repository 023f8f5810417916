//! Download job scheduling.
//!
//! Flattens per-feed results into one job list, records every enqueued URL
//! into the history set up front (best-effort accounting, not transactional),
//! shuffles the list, and drains it through a bounded worker pool.

mod jobs;
mod pool;

pub use jobs::{prepare_jobs, shuffle_jobs, Job, FEED_URL_FILE};
pub use pool::{run_downloads, DownloadReport};
