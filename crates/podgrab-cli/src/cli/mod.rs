//! CLI for the podgrab podcast fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use podgrab_core::config::{self, AppPaths};
use std::path::PathBuf;

use commands::{run_feeds, run_history, run_pipeline};

/// Top-level CLI for the podgrab podcast fetcher.
#[derive(Debug, Parser)]
#[command(name = "podgrab")]
#[command(about = "podgrab: fetch new podcast episodes from configured feeds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check all configured feeds and download new episodes.
    Run {
        /// Download into DIR instead of the configured download directory.
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Run up to N downloads concurrently (overrides the config value).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Answer yes to every prompt (non-interactive use).
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List the configured feed URLs.
    Feeds,

    /// Show how many downloads are recorded in history.
    History,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let paths = AppPaths::resolve(&cfg)?;

        match cli.command {
            CliCommand::Run { dir, jobs, yes } => run_pipeline(cfg, paths, dir, jobs, yes).await?,
            CliCommand::Feeds => run_feeds(&paths)?,
            CliCommand::History => run_history(&paths)?,
        }

        Ok(())
    }
}
