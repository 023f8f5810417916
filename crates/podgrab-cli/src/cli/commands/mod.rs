//! CLI command handlers, one per file.

mod feeds;
mod history;
mod run;

pub use feeds::run_feeds;
pub use history::run_history;
pub use run::run_pipeline;
