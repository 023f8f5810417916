//! `podgrab feeds` – list the configured feed URLs.

use anyhow::Result;
use podgrab_core::config::AppPaths;
use podgrab_core::feeds;

pub fn run_feeds(paths: &AppPaths) -> Result<()> {
    let feed_urls = feeds::load_feeds(&paths.feeds_file)?;
    if feed_urls.is_empty() {
        println!("No feeds configured in {}.", paths.feeds_file.display());
        return Ok(());
    }
    for url in feed_urls {
        println!("{url}");
    }
    Ok(())
}
