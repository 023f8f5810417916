use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application prefix for XDG config and state directories.
const APP_PREFIX: &str = "podgrab";

/// Global configuration loaded from `~/.config/podgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodgrabConfig {
    /// Maximum number of concurrent episode downloads. Historically tuned
    /// between 2 and 10; values below 1 are clamped at dispatch time.
    pub max_concurrent_downloads: usize,
    /// Root directory for downloaded episodes. Defaults to `./podcasts`
    /// under the current working directory when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Optional User-Agent override for feed fetches and downloads.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for PodgrabConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 4,
            download_dir: None,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PodgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PodgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PodgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Resolved filesystem locations for one run. Constructed once at startup
/// and passed into the pipeline; no component reads ambient globals.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Feed list, one URL per line (`~/.config/podgrab/feeds.conf`).
    pub feeds_file: PathBuf,
    /// Newline-delimited record of already-downloaded enclosure URLs.
    pub history_file: PathBuf,
    /// Root directory receiving one subdirectory per podcast.
    pub download_root: PathBuf,
}

impl AppPaths {
    pub fn resolve(cfg: &PodgrabConfig) -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
        let config_dir = xdg_dirs.get_config_home().join(APP_PREFIX);
        let download_root = match &cfg.download_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?.join("podcasts"),
        };
        Ok(Self {
            feeds_file: config_dir.join("feeds.conf"),
            history_file: config_dir.join("history"),
            download_root,
        })
    }
}
