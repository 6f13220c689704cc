//! Alert sinks for the watch loop.
//!
//! Added/removed names and session status go to every configured sink:
//! human-readable lines or NDJSON (machine-readable).

use super::state::WatchSummary;
use crate::config::{OutputConfig, OutputFormat};
use std::io::Write;

/// Trait for receiving watch events.
pub(crate) trait AlertSink {
    /// Called when names appeared in the watched directory.
    fn on_added(&mut self, names: &[String]) -> anyhow::Result<()>;

    /// Called when names disappeared from the watched directory.
    fn on_removed(&mut self, names: &[String]) -> anyhow::Result<()>;

    /// Called at startup and shutdown with a session summary.
    fn on_status(&mut self, summary: &WatchSummary) -> anyhow::Result<()>;
}

// ============================================================================
// Text sink: `Added: a, b` lines
// ============================================================================

pub(crate) struct TextAlertSink {
    writer: Box<dyn Write + Send>,
    quiet: bool,
}

impl TextAlertSink {
    pub(crate) fn new(writer: Box<dyn Write + Send>, quiet: bool) -> Self {
        Self { writer, quiet }
    }

    fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        let ts = chrono::Local::now().format("%H:%M:%S");
        writeln!(self.writer, "[{ts}] {line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl AlertSink for TextAlertSink {
    fn on_added(&mut self, names: &[String]) -> anyhow::Result<()> {
        self.write_line(&format!("Added: {}", names.join(", ")))
    }

    fn on_removed(&mut self, names: &[String]) -> anyhow::Result<()> {
        self.write_line(&format!("Removed: {}", names.join(", ")))
    }

    fn on_status(&mut self, summary: &WatchSummary) -> anyhow::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(&format!(
            "Tracking {} entries | {} polls | +{} -{} | {} sent, {} failed | uptime {}s",
            summary.tracked_count,
            summary.iterations,
            summary.total_added,
            summary.total_removed,
            summary.notifications_sent,
            summary.notification_failures,
            summary.uptime_secs,
        ))
    }
}

// ============================================================================
// NDJSON sink: one JSON object per event
// ============================================================================

pub(crate) struct NdjsonAlertSink {
    writer: Box<dyn Write + Send>,
}

impl NdjsonAlertSink {
    pub(crate) fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    fn write_event(&mut self, event: &serde_json::Value) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl AlertSink for NdjsonAlertSink {
    fn on_added(&mut self, names: &[String]) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "added",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "names": names,
        });
        self.write_event(&event)
    }

    fn on_removed(&mut self, names: &[String]) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "removed",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "names": names,
        });
        self.write_event(&event)
    }

    fn on_status(&mut self, summary: &WatchSummary) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "status",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "tracked": summary.tracked_count,
            "iterations": summary.iterations,
            "total_added": summary.total_added,
            "total_removed": summary.total_removed,
            "notifications_sent": summary.notifications_sent,
            "notification_failures": summary.notification_failures,
            "read_failures": summary.read_failures,
            "uptime_secs": summary.uptime_secs,
        });
        self.write_event(&event)
    }
}

// ============================================================================
// Sink builder
// ============================================================================

/// Build alert sinks from the output configuration.
pub(crate) fn build_alert_sinks(output: &OutputConfig) -> anyhow::Result<Vec<Box<dyn AlertSink>>> {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();

    match output.format {
        OutputFormat::Json => {
            let writer: Box<dyn Write + Send> = match &output.file {
                Some(path) => {
                    let file = std::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)?;
                    Box::new(file)
                }
                None => Box::new(std::io::stdout()),
            };
            sinks.push(Box::new(NdjsonAlertSink::new(writer)));
        }
        OutputFormat::Text => {
            if let Some(path) = &output.file {
                tracing::warn!(
                    "Ignoring output file {} for text output; use json format",
                    path.display()
                );
            }
            sinks.push(Box::new(TextAlertSink::new(
                Box::new(std::io::stdout()),
                output.quiet,
            )));
        }
    }

    Ok(sinks)
}

/// Fan an event out to every sink; sink failures are logged, never fatal.
pub(crate) fn emit_all<F>(sinks: &mut [Box<dyn AlertSink>], mut f: F)
where
    F: FnMut(&mut dyn AlertSink) -> anyhow::Result<()>,
{
    for sink in sinks.iter_mut() {
        if let Err(e) = f(sink.as_mut()) {
            tracing::warn!("Alert sink error: {e}");
        }
    }
}
