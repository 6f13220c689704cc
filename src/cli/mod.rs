//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand that does more
//! than print.

mod watch;

pub use watch::run_watch;

// Re-export config types used by handlers
pub use crate::watch::WatchConfig;
