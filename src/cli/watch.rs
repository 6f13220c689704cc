//! CLI handler for the `watch` subcommand.

use crate::notify::build_notifier;
use crate::watch::{run_watch_loop, WatchConfig, WatchError, WatchSummary};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Run the watch command with the given configuration.
///
/// Everything that can be checked before the first poll is checked here and
/// is fatal: the watch path and the mail setup.
pub fn run_watch(config: &WatchConfig) -> Result<WatchSummary> {
    let dir = &config.watch_dir;
    if !dir.exists() {
        return Err(WatchError::DirNotFound(dir.clone()).into());
    }
    if !dir.is_dir() {
        return Err(WatchError::NotADirectory(dir.clone()).into());
    }

    let mut notifier = build_notifier(&config.mail).context("setting up mail delivery")?;
    let stop = install_stop_handler();

    run_watch_loop(config, notifier.as_mut(), &stop)
}

/// Install a Ctrl-C handler that sets the returned flag.
fn install_stop_handler() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        tracing::warn!("Cannot install Ctrl-C handler, stop with a signal instead: {e}");
    }
    stop
}
