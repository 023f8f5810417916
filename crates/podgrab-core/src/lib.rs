pub mod config;
pub mod logging;

pub mod confirm;
pub mod download;
pub mod feed;
pub mod feeds;
pub mod history;
pub mod naming;
pub mod pipeline;
pub mod scheduler;
