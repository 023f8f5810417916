//! Feed fetching and new-episode extraction.
//!
//! Feeds are processed one at a time; the documents are small, so there is
//! nothing to gain from fetching them concurrently. Per-feed failures are
//! reported and skipped so one broken feed never aborts the whole run.

use feed_rs::model::Entry;
use reqwest::Client;

use crate::history::History;
use crate::naming::normalize_title;

/// Title used when a feed carries none.
pub const NO_TITLE_PLACEHOLDER: &str = "(no title)";

/// New episodes found in one feed. Transient; its URLs enter the history
/// set when jobs are prepared, the rest is dropped after the run.
#[derive(Debug, Clone)]
pub struct FeedResult {
    /// Normalized title, used as the destination folder name.
    pub dir_name: String,
    /// The feed URL this result came from (recorded in the folder metadata).
    pub feed_url: String,
    /// Enclosure URLs not yet in history, in feed entry order.
    pub new_urls: Vec<String>,
}

/// Fetch and parse one feed, returning its new enclosures, or `None` when
/// the feed is unusable or has nothing new. Prints a one-line summary per
/// feed; failures go to stderr and never abort the run.
pub async fn process_feed(client: &Client, feed_url: &str, history: &History) -> Option<FeedResult> {
    let body = match fetch(client, feed_url).await {
        Ok(body) => body,
        Err(e) => {
            eprintln!("{}: fetch failed: {:#}", feed_url, e);
            return None;
        }
    };

    let feed = match feed_rs::parser::parse(body.as_slice()) {
        Ok(feed) => feed,
        Err(e) => {
            // Malformed beyond recovery: no title could be extracted either.
            eprintln!("{}: not a usable feed: {}", feed_url, e);
            return None;
        }
    };

    let title = feed
        .title
        .as_ref()
        .map(|t| t.content.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_TITLE_PLACEHOLDER);

    let new_urls: Vec<String> = feed
        .entries
        .iter()
        .filter_map(|entry| first_new_enclosure(entry, history))
        .collect();

    tracing::debug!(
        feed = feed_url,
        entries = feed.entries.len(),
        new = new_urls.len(),
        "processed feed"
    );

    if new_urls.is_empty() {
        println!("{}: no new episodes", title);
        return None;
    }

    println!("{}: {} new episode(s)", title, new_urls.len());
    Some(FeedResult {
        dir_name: normalize_title(title),
        feed_url: feed_url.to_string(),
        new_urls,
    })
}

/// First enclosure URL of `entry` that is not already in history.
///
/// At most one URL per entry; further enclosures on the same entry are
/// ignored for compatibility with the historical behavior. Atom feeds mark
/// enclosures with `rel="enclosure"` on entry links; RSS `<enclosure>` tags
/// surface as media objects in the parsed model, so both are checked in
/// that order.
fn first_new_enclosure(entry: &Entry, history: &History) -> Option<String> {
    entry
        .links
        .iter()
        .filter(|link| link.rel.as_deref() == Some("enclosure"))
        .map(|link| link.href.clone())
        .chain(
            entry
                .media
                .iter()
                .flat_map(|media| media.content.iter())
                .filter_map(|content| content.url.as_ref().map(|u| u.to_string())),
        )
        .find(|url| !history.contains(url))
}

async fn fetch(client: &Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP {}", status);
    }
    Ok(response.bytes().await?.to_vec())
}
