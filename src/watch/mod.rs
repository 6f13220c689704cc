//! Directory polling and change detection.
//!
//! Takes flat snapshots of one directory at a fixed interval, diffs each
//! snapshot against the previous one, reports added and removed names
//! through alert sinks, and hands additions to a [`Notifier`](crate::notify::Notifier).

pub(crate) mod alerts;
pub(crate) mod config;
pub(crate) mod diff;
pub(crate) mod loop_impl;
pub(crate) mod snapshot;
pub(crate) mod state;

pub use config::{parse_duration, WatchConfig};
pub use diff::SnapshotDiff;
pub use loop_impl::run_watch_loop;
pub use snapshot::{take_snapshot, Snapshot};
pub use state::{LoopState, WatchSummary};

/// Errors specific to the watch subsystem.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WatchError {
    #[error("invalid interval '{0}': expected format like 500ms, 5s, 1m")]
    InvalidInterval(String),

    #[error("no watch directory given (pass DIR or set watch.dir)")]
    MissingDir,

    #[error("watch directory does not exist: {}", .0.display())]
    DirNotFound(std::path::PathBuf),

    #[error("watch path is not a directory: {}", .0.display())]
    NotADirectory(std::path::PathBuf),

    #[error("invalid configuration:\n  {}", .0.join("\n  "))]
    InvalidConfig(Vec<String>),
}
