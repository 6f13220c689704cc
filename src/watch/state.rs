//! Watch loop state.
//!
//! The previous snapshot lives here and nowhere else; [`LoopState::advance`]
//! is the only way it changes.

use super::diff::SnapshotDiff;
use super::snapshot::Snapshot;
use std::time::Instant;

/// State carried from one poll iteration to the next.
#[derive(Debug)]
pub struct LoopState {
    previous: Snapshot,
    /// When the watch session started.
    pub started_at: Instant,
    /// Completed poll iterations, including failed ones.
    pub iterations: u64,
    /// Cumulative number of added names reported.
    pub total_added: u64,
    /// Cumulative number of removed names reported.
    pub total_removed: u64,
    pub notifications_sent: u64,
    pub notification_failures: u64,
    /// Polls where the directory could not be read.
    pub read_failures: u64,
    /// Timestamp of most recent poll.
    pub last_poll: Option<Instant>,
}

impl LoopState {
    /// Start a session from the baseline snapshot taken at startup.
    #[must_use]
    pub fn new(baseline: Snapshot) -> Self {
        Self {
            previous: baseline,
            started_at: Instant::now(),
            iterations: 0,
            total_added: 0,
            total_removed: 0,
            notifications_sent: 0,
            notification_failures: 0,
            read_failures: 0,
            last_poll: None,
        }
    }

    /// The snapshot the next poll will be compared against.
    #[must_use]
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    /// Diff `current` against the stored snapshot, then store `current`.
    pub fn advance(&mut self, current: Snapshot) -> SnapshotDiff {
        let diff = SnapshotDiff::between(&self.previous, &current);
        self.total_added += diff.added.len() as u64;
        self.total_removed += diff.removed.len() as u64;
        self.previous = current;
        diff
    }

    /// Record that a poll iteration ran.
    pub(crate) fn record_poll(&mut self) {
        self.iterations += 1;
        self.last_poll = Some(Instant::now());
    }

    /// Counters for sinks and the final report.
    #[must_use]
    pub fn summary(&self) -> WatchSummary {
        WatchSummary {
            tracked_count: self.previous.len(),
            iterations: self.iterations,
            total_added: self.total_added,
            total_removed: self.total_removed,
            notifications_sent: self.notifications_sent,
            notification_failures: self.notification_failures,
            read_failures: self.read_failures,
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}

/// Summary of the current watch session, passed to alert sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSummary {
    /// Entries in the most recent snapshot
    pub tracked_count: usize,
    pub iterations: u64,
    pub total_added: u64,
    pub total_removed: u64,
    pub notifications_sent: u64,
    pub notification_failures: u64,
    pub read_failures: u64,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(names: &[&str]) -> Snapshot {
        names.iter().copied().collect()
    }

    #[test]
    fn test_state_new() {
        let state = LoopState::new(snap(&["a"]));
        assert_eq!(state.iterations, 0);
        assert_eq!(state.previous(), &snap(&["a"]));
        assert!(state.last_poll.is_none());
    }

    #[test]
    fn test_advance_stores_current_snapshot() {
        let mut state = LoopState::new(snap(&["a", "b"]));
        let current = snap(&["b", "c"]);

        let diff = state.advance(current.clone());

        assert_eq!(diff.added, vec!["c"]);
        assert_eq!(diff.removed, vec!["a"]);
        assert_eq!(state.previous(), &current);
    }

    #[test]
    fn test_advance_accumulates_totals() {
        let mut state = LoopState::new(Snapshot::new());
        state.advance(snap(&["x", "y"]));
        state.advance(snap(&["y"]));
        state.advance(snap(&["y"]));

        assert_eq!(state.total_added, 2);
        assert_eq!(state.total_removed, 1);
    }

    #[test]
    fn test_summary_reflects_counters() {
        let mut state = LoopState::new(snap(&["a"]));
        state.record_poll();
        state.record_poll();
        state.notifications_sent = 1;
        state.read_failures = 1;

        let summary = state.summary();
        assert_eq!(summary.tracked_count, 1);
        assert_eq!(summary.iterations, 2);
        assert_eq!(summary.notifications_sent, 1);
        assert_eq!(summary.read_failures, 1);
        assert!(state.last_poll.is_some());
    }
}
