//! Configuration types for dirwatch.
//!
//! Provides the file-backed [`AppConfig`] and its sections.

use super::defaults::{
    DEFAULT_BODY, DEFAULT_INTERVAL, DEFAULT_MAX_ATTACHMENT_BYTES, DEFAULT_MAIL_TIMEOUT_SECS,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_SUBJECT,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Built-in defaults are overlaid by the config file, which is in turn
/// overlaid by CLI flags (see [`AppConfig::apply_overrides`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// What to watch and how often
    pub watch: WatchSettings,
    /// Mail delivery for new-file notifications
    pub mail: MailConfig,
    /// Where loop reports go
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Watch Settings
// ============================================================================

/// Watch directory and polling behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WatchSettings {
    /// Directory to poll (flat listing, no recursion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Polling interval, e.g. `5s`, `500ms`, `1m`
    pub interval: String,
    /// Stop after the first iteration that sees a change
    pub exit_on_change: bool,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            dir: None,
            interval: DEFAULT_INTERVAL.to_string(),
            exit_on_change: false,
        }
    }
}

// ============================================================================
// Mail Configuration
// ============================================================================

/// SMTP submission settings and message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MailConfig {
    /// Send mail at all; when false, notifications are only logged
    pub enabled: bool,
    /// SMTP submission host (STARTTLS)
    pub smtp_host: String,
    /// SMTP submission port
    pub smtp_port: u16,
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Recipient address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// SMTP login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// SMTP password. Prefer the `DIRWATCH_SMTP_PASSWORD` environment variable.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Message subject
    pub subject: String,
    /// Message body; the added file names are appended below it
    pub body: String,
    /// A fixed file attached to every notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<PathBuf>,
    /// Attach each newly added file from the watch directory
    pub attach_added_files: bool,
    /// Added files larger than this are not attached
    pub max_attachment_bytes: u64,
    /// SMTP connection timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            from: None,
            to: None,
            username: None,
            password: None,
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            attachment: None,
            attach_added_files: false,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            timeout_secs: DEFAULT_MAIL_TIMEOUT_SECS,
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Format of the added/removed reports written by the watch loop.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Added: a, b` lines on stdout
    #[default]
    Text,
    /// One JSON object per event (NDJSON)
    Json,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// NDJSON target file, appended to (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Suppress status lines
    pub quiet: bool,
}

// ============================================================================
// Command-Line Overrides
// ============================================================================

/// Values given on the command line, applied over the loaded config.
///
/// `None` means "not given", so an explicit value always wins even when it
/// equals the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub dir: Option<PathBuf>,
    pub interval: Option<String>,
    pub exit_on_change: Option<bool>,

    pub mail_enabled: Option<bool>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub subject: Option<String>,
    pub attachment: Option<PathBuf>,
    pub attach_added_files: Option<bool>,

    pub format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
}
