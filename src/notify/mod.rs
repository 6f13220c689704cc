//! New-file notifications.
//!
//! The watch loop only sees the [`Notifier`] trait. [`SmtpNotifier`] delivers
//! mail over an authenticated STARTTLS submission connection;
//! [`LogNotifier`] only logs, for runs with mail disabled.

mod message;
mod smtp;

pub use message::build_message;
pub use smtp::SmtpNotifier;

use crate::config::MailConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Receives one notification per poll iteration that saw added names.
pub trait Notifier {
    /// Deliver `notification`. Failures are reported, never retried.
    fn notify(&mut self, notification: &Notification) -> Result<()>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        (**self).notify(notification)
    }
}

/// A file to attach to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSource {
    pub path: PathBuf,
    /// A required attachment that cannot be read fails the send; an
    /// optional one is skipped with a warning.
    pub required: bool,
}

/// One outgoing message: static subject and body plus the added names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    /// Full plain-text body, names included
    pub body: String,
    /// Added names, sorted
    pub added: Vec<String>,
    pub attachments: Vec<AttachmentSource>,
}

impl Notification {
    /// Build a notification without attachments.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: &str, added: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            body: render_body(body, &added),
            added,
            attachments: Vec::new(),
        }
    }

    /// Add an attachment.
    #[must_use]
    pub fn with_attachment(mut self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.attachments.push(AttachmentSource {
            path: path.into(),
            required,
        });
        self
    }

    /// Build the notification for `added` using the mail settings.
    ///
    /// The fixed attachment is always required. With `attach_added_files`,
    /// each added name that is a regular file within the size cap is attached
    /// as optional; the rest are skipped with a warning.
    #[must_use]
    pub fn compose(mail: &MailConfig, watch_dir: &Path, added: &[String]) -> Self {
        let mut notification = Self::new(mail.subject.clone(), &mail.body, added.to_vec());

        if let Some(ref fixed) = mail.attachment {
            notification = notification.with_attachment(fixed.clone(), true);
        }

        if mail.attach_added_files {
            for name in added {
                let path = watch_dir.join(name);
                match std::fs::metadata(&path) {
                    Ok(meta) if !meta.is_file() => {
                        tracing::debug!("Not attaching {}: not a regular file", path.display());
                    }
                    Ok(meta) if meta.len() > mail.max_attachment_bytes => {
                        tracing::warn!(
                            "Not attaching {}: {} bytes exceeds limit of {}",
                            path.display(),
                            meta.len(),
                            mail.max_attachment_bytes
                        );
                    }
                    Ok(_) => notification = notification.with_attachment(path, false),
                    Err(e) => {
                        tracing::warn!("Not attaching {}: {e}", path.display());
                    }
                }
            }
        }

        notification
    }
}

/// Static body, a blank line, then one `- name` line per added name.
fn render_body(body: &str, added: &[String]) -> String {
    let mut out = body.trim_end().to_string();
    out.push_str("\n\n");
    for name in added {
        out.push_str("- ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Logs notifications instead of sending them.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        tracing::info!(
            "Mail disabled, not sending '{}' for {} new file(s): {}",
            notification.subject,
            notification.added.len(),
            notification.added.join(", ")
        );
        Ok(())
    }
}

/// Pick the notifier for the given mail settings.
///
/// Fails when mail is enabled but the sender, recipient, or credentials are
/// unusable.
pub fn build_notifier(mail: &MailConfig) -> Result<Box<dyn Notifier>> {
    if mail.enabled {
        Ok(Box::new(SmtpNotifier::new(mail)?))
    } else {
        Ok(Box::new(LogNotifier))
    }
}
