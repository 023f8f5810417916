//! `podgrab history` – summarize the download history.

use anyhow::Result;
use podgrab_core::config::AppPaths;
use podgrab_core::history::History;

pub fn run_history(paths: &AppPaths) -> Result<()> {
    let history = History::load(&paths.history_file)?;
    println!(
        "{} download(s) recorded in {}",
        history.len(),
        paths.history_file.display()
    );
    Ok(())
}
