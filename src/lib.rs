//! **Poll a directory and get an email when new files show up.**
//!
//! `dirwatch` takes a flat listing of one directory at a fixed interval,
//! compares it with the previous listing, reports what was added and removed,
//! and sends one notification per poll that saw additions.
//!
//! ## Core Concepts & Modules
//!
//! - **[`watch`]**: snapshots ([`Snapshot`]), the added/removed computation
//!   ([`SnapshotDiff`]), loop state ([`LoopState`]), and the cancellation-aware
//!   [`run_watch_loop`].
//! - **[`notify`]**: the [`Notifier`] trait, SMTP delivery through `lettre`,
//!   and a log-only notifier.
//! - **[`config`]**: YAML config discovery, loading, validation, and merging
//!   with CLI flags.
//! - **[`error`]**: the crate error type and context helpers.
//!
//! ## Diffing two snapshots
//!
//! ```
//! use dirwatch::{Snapshot, SnapshotDiff};
//!
//! let previous: Snapshot = ["a", "b"].into_iter().collect();
//! let current: Snapshot = ["b", "c"].into_iter().collect();
//!
//! let diff = SnapshotDiff::between(&previous, &current);
//! assert_eq!(diff.added, vec!["c"]);
//! assert_eq!(diff.removed, vec!["a"]);
//! ```
//!
//! ## Plugging in a notifier
//!
//! The loop only talks to the [`Notifier`] trait, so delivery can be swapped
//! out:
//!
//! ```no_run
//! use dirwatch::notify::{Notification, Notifier};
//! use dirwatch::watch::{run_watch_loop, WatchConfig};
//! use dirwatch::AppConfig;
//! use std::sync::atomic::AtomicBool;
//!
//! struct Stdout;
//!
//! impl Notifier for Stdout {
//!     fn notify(&mut self, n: &Notification) -> dirwatch::Result<()> {
//!         println!("{}: {}", n.subject, n.added.join(", "));
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = AppConfig::default();
//!     app.watch.dir = Some("/srv/incoming".into());
//!     app.mail.enabled = false;
//!
//!     let config = WatchConfig::from_app_config(&app, false)?;
//!     let stop = AtomicBool::new(false);
//!     run_watch_loop(&config, &mut Stdout, &stop)?;
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counters are u64, set sizes are usize; values never approach the limits
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod watch;

// Re-export main types for convenience
pub use config::{
    AppConfig, ConfigError, ConfigOverrides, MailConfig, OutputConfig, OutputFormat, Validatable,
};
pub use error::{DirwatchError, ErrorContext, NotifyErrorKind, OptionContext, Result};
pub use notify::{LogNotifier, Notification, Notifier, SmtpNotifier};
pub use watch::{
    parse_duration, run_watch_loop, take_snapshot, LoopState, Snapshot, SnapshotDiff,
    WatchConfig, WatchError, WatchSummary,
};
