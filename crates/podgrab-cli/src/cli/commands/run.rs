//! `podgrab run` – check feeds and download new episodes.

use anyhow::Result;
use podgrab_core::config::{AppPaths, PodgrabConfig};
use podgrab_core::confirm::{AssumeYes, Confirm, StdinConfirm};
use podgrab_core::download;
use podgrab_core::pipeline::{self, RunOutcome};
use std::path::PathBuf;

pub async fn run_pipeline(
    mut cfg: PodgrabConfig,
    mut paths: AppPaths,
    dir: Option<PathBuf>,
    jobs: Option<usize>,
    yes: bool,
) -> Result<()> {
    if let Some(dir) = dir {
        paths.download_root = dir;
    }
    if let Some(jobs) = jobs {
        cfg.max_concurrent_downloads = jobs;
    }

    let client = download::http_client(cfg.user_agent.as_deref())?;
    let confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    match pipeline::run(&client, &cfg, &paths, confirm.as_ref()).await? {
        RunOutcome::NothingNew => {}
        RunOutcome::Declined => println!("Aborted; nothing downloaded."),
        RunOutcome::Completed { ok, failed } => {
            println!("Done: {} downloaded, {} failed.", ok, failed);
        }
    }
    Ok(())
}
