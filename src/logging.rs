//! Log setup for the terminal binary.
//!
//! The game owns the terminal in raw mode, so logs never go to stdout or
//! stderr. With no log path configured no subscriber is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;

use crate::config::Config;

pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(config.log_level)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(level = %config.log_level, "logging initialized");
    Ok(())
}
