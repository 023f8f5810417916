//! Single URL to file transfer.
//!
//! One episode per call: derive the filename from the URL, stream the body
//! to `dir/filename`, overwrite whatever is there. No resume, no checksum,
//! no content-type validation, no request timeout (a hung transfer occupies
//! its worker slot; known gap carried over from the historical behavior).

use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::naming::episode_filename;

/// Default User-Agent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("podgrab/", env!("CARGO_PKG_VERSION"));

/// Error from one episode transfer. Classified so the scheduler can report
/// it without aborting sibling downloads.
#[derive(Debug)]
pub enum DownloadError {
    /// Request could not be sent or the body stream broke mid-transfer.
    Request(reqwest::Error),
    /// Server answered with a non-2xx status.
    Http(reqwest::StatusCode),
    /// Local file create/write failed.
    Storage(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Request(e) => write!(f, "{}", e),
            DownloadError::Http(status) => write!(f, "HTTP {}", status),
            DownloadError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Request(e) => Some(e),
            DownloadError::Storage(e) => Some(e),
            DownloadError::Http(_) => None,
        }
    }
}

/// Build the shared HTTP client used for feed fetches and downloads.
pub fn http_client(user_agent: Option<&str>) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .build()
}

/// Download `url` into `dest_dir`, returning the written path.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    dest_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let path = dest_dir.join(episode_filename(url));

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(DownloadError::Request)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Http(status));
    }

    let file = tokio::fs::File::create(&path)
        .await
        .map_err(DownloadError::Storage)?;
    let mut writer = BufWriter::new(file);
    while let Some(chunk) = response.chunk().await.map_err(DownloadError::Request)? {
        writer
            .write_all(&chunk)
            .await
            .map_err(DownloadError::Storage)?;
    }
    writer.flush().await.map_err(DownloadError::Storage)?;

    tracing::debug!(url, path = %path.display(), "download finished");
    Ok(path)
}
