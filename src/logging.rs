//! File logging
//!
//! The terminal belongs to the UI, so log lines go to `formdesk.log` in the
//! user directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

pub const LOG_FILE_NAME: &str = "formdesk.log";

/// Install the global subscriber; `RUST_LOG` overrides the configured level
pub fn init(user_dir: &Path, config: &LogConfig) -> Result<PathBuf> {
    fs::create_dir_all(user_dir)
        .with_context(|| format!("Could not create {}", user_dir.display()))?;

    let log_path = user_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Could not open {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))?;

    Ok(log_path)
}
