//! Main watch loop orchestrator.
//!
//! Coordinates snapshots, diffing, reporting, and notification.

use super::alerts::{build_alert_sinks, emit_all, AlertSink};
use super::config::WatchConfig;
use super::diff::SnapshotDiff;
use super::snapshot::take_snapshot;
use super::state::{LoopState, WatchSummary};
use crate::error::ErrorContext;
use crate::notify::{Notification, Notifier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep while waiting for the next poll.
const STOP_CHECK_SLICE: Duration = Duration::from_millis(100);

/// What happened to the notification in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotifyStatus {
    /// Nothing was added.
    NotNeeded,
    Sent,
    Failed,
}

/// Result of one poll iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollOutcome {
    /// The directory could not be read; the previous snapshot was kept.
    SnapshotFailed,
    Compared {
        diff: SnapshotDiff,
        notify: NotifyStatus,
    },
}

impl PollOutcome {
    fn has_changes(&self) -> bool {
        matches!(self, Self::Compared { diff, .. } if !diff.is_empty())
    }
}

/// Run the main watch loop.
///
/// Takes the baseline snapshot (failure is fatal), then polls every
/// `config.poll_interval` until `stop` is set or, with `exit_on_change`,
/// until the first iteration that sees a change. Returns the final session
/// summary.
pub fn run_watch_loop(
    config: &WatchConfig,
    notifier: &mut dyn Notifier,
    stop: &AtomicBool,
) -> anyhow::Result<WatchSummary> {
    let baseline = take_snapshot(&config.watch_dir)
        .context("taking baseline snapshot")?;
    let mut sinks = build_alert_sinks(&config.output)?;
    let mut state = LoopState::new(baseline);

    log_watch_started(&state, config);
    emit_status(&state, &mut sinks);

    if config.dry_run {
        if !config.output.quiet {
            eprintln!(
                "Dry run: {} entr{} in {}",
                state.previous().len(),
                if state.previous().len() == 1 { "y" } else { "ies" },
                config.watch_dir.display()
            );
            for name in state.previous().iter() {
                eprintln!("  {name}");
            }
        }
        return Ok(state.summary());
    }

    loop {
        if !wait_for_next_poll(config.poll_interval, stop) {
            break;
        }

        let outcome = poll_once(config, &mut state, notifier, &mut sinks);

        if config.exit_on_change && outcome.has_changes() {
            tracing::info!("Change detected, exiting (--exit-on-change)");
            break;
        }
    }

    emit_status(&state, &mut sinks);
    tracing::info!("Stopped watching {}", config.watch_dir.display());
    Ok(state.summary())
}

/// Run one iteration: snapshot, diff, report, notify, advance.
pub(crate) fn poll_once(
    config: &WatchConfig,
    state: &mut LoopState,
    notifier: &mut dyn Notifier,
    sinks: &mut [Box<dyn AlertSink>],
) -> PollOutcome {
    state.record_poll();

    let current = match take_snapshot(&config.watch_dir) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            state.read_failures += 1;
            tracing::warn!("Cannot read {}, will retry: {e}", config.watch_dir.display());
            return PollOutcome::SnapshotFailed;
        }
    };

    let diff = state.advance(current);

    if !diff.removed.is_empty() {
        tracing::debug!("{} name(s) removed", diff.removed.len());
        emit_all(sinks, |s| s.on_removed(&diff.removed));
    }

    let notify = if diff.has_additions() {
        emit_all(sinks, |s| s.on_added(&diff.added));
        send_notification(config, state, notifier, &diff.added)
    } else {
        NotifyStatus::NotNeeded
    };

    PollOutcome::Compared { diff, notify }
}

fn send_notification(
    config: &WatchConfig,
    state: &mut LoopState,
    notifier: &mut dyn Notifier,
    added: &[String],
) -> NotifyStatus {
    let notification = Notification::compose(&config.mail, &config.watch_dir, added);
    match notifier.notify(&notification) {
        Ok(()) => {
            state.notifications_sent += 1;
            NotifyStatus::Sent
        }
        Err(e) => {
            state.notification_failures += 1;
            tracing::error!("Notification for {} new file(s) failed: {e}", added.len());
            NotifyStatus::Failed
        }
    }
}

/// Sleep for `interval`, waking early if `stop` is set.
///
/// An interval too large to represent as a deadline waits until `stop`.
/// Returns `false` when the loop should stop.
fn wait_for_next_poll(interval: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(interval);
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return true;
                }
                deadline - now
            }
            None => STOP_CHECK_SLICE,
        };
        std::thread::sleep(remaining.min(STOP_CHECK_SLICE));
    }
}

fn emit_status(state: &LoopState, sinks: &mut [Box<dyn AlertSink>]) {
    let summary = state.summary();
    emit_all(sinks, |s| s.on_status(&summary));
}

fn log_watch_started(state: &LoopState, config: &WatchConfig) {
    tracing::info!(
        "Watching {} ({} existing entries, poll every {:?}, mail {})",
        config.watch_dir.display(),
        state.previous().len(),
        config.poll_interval,
        if config.mail.enabled { "enabled" } else { "disabled" },
    );
}
