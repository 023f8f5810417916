//! The full fetch run: feeds → dedup → confirm → scheduled downloads.

use anyhow::{Context, Result};

use crate::config::{AppPaths, PodgrabConfig};
use crate::confirm::Confirm;
use crate::feed::{self, FeedResult};
use crate::feeds;
use crate::history::{self, History, PersistMode};
use crate::scheduler;

/// How a run ended. All three are normal completions (exit 0); fatal
/// configuration problems surface as `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every feed was empty or unusable; nothing was prompted or written.
    NothingNew,
    /// Operator declined the download prompt; no download was started.
    Declined,
    /// The pool ran; `ok` + `failed` equals the number of dispatched jobs.
    Completed { ok: usize, failed: usize },
}

/// Run the whole pipeline once.
///
/// Feeds are processed strictly sequentially; only the download phase is
/// concurrent. The history file is appended after the pool drains, with
/// every URL that was enqueued (even ones whose transfer failed).
pub async fn run(
    client: &reqwest::Client,
    cfg: &PodgrabConfig,
    paths: &AppPaths,
    confirm: &dyn Confirm,
) -> Result<RunOutcome> {
    let feed_urls = feeds::load_feeds(&paths.feeds_file)?;
    let mut history = History::load(&paths.history_file)?;
    tracing::info!(
        feeds = feed_urls.len(),
        known = history.len(),
        "starting run"
    );

    let mut results: Vec<FeedResult> = Vec::new();
    for url in &feed_urls {
        if let Some(result) = feed::process_feed(client, url, &history).await {
            results.push(result);
        }
    }

    if results.is_empty() {
        println!("Nothing new to download.");
        return Ok(RunOutcome::NothingNew);
    }

    let total: usize = results.iter().map(|r| r.new_urls.len()).sum();
    println!("{} new episode(s) in total.", total);

    if paths.download_root.exists()
        && confirm.confirm(
            &format!(
                "Download directory {} already exists. Remove it and start fresh?",
                paths.download_root.display()
            ),
            false,
        )
    {
        std::fs::remove_dir_all(&paths.download_root)
            .with_context(|| format!("failed to remove {}", paths.download_root.display()))?;
    }

    if !confirm.confirm("Start downloading?", true) {
        return Ok(RunOutcome::Declined);
    }

    let (mut jobs, enqueued) =
        scheduler::prepare_jobs(&results, &paths.download_root, &mut history)?;
    scheduler::shuffle_jobs(&mut jobs);

    let report = scheduler::run_downloads(client, jobs, cfg.max_concurrent_downloads).await;

    history::persist(&paths.history_file, &enqueued, PersistMode::Append)?;
    tracing::info!(ok = report.ok, failed = report.failed, "run finished");

    Ok(RunOutcome::Completed {
        ok: report.ok,
        failed: report.failed,
    })
}
