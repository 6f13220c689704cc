//! SMTP delivery over authenticated STARTTLS submission.

use super::message::{build_message, parse_mailbox};
use super::{Notification, Notifier};
use crate::config::MailConfig;
use crate::error::{DirwatchError, ErrorContext, OptionContext, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use std::time::Duration;

/// Sends each notification as one message to the configured recipient.
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
    relay: String,
}

impl SmtpNotifier {
    /// Set up the transport. No connection is made until the first send.
    pub fn new(mail: &MailConfig) -> Result<Self> {
        let from = parse_mailbox("mail.from", mail.from.as_deref())?;
        let to = parse_mailbox("mail.to", mail.to.as_deref())?;
        let username = mail
            .username
            .clone()
            .filter(|u| !u.trim().is_empty())
            .context_none("mail.username is not set")?;
        let password = mail
            .password
            .clone()
            .filter(|p| !p.trim().is_empty())
            .context_none(format!(
                "SMTP password is not set (use {})",
                crate::config::PASSWORD_ENV
            ))?;

        let transport = SmtpTransport::starttls_relay(&mail.smtp_host)
            .map_err(|e| DirwatchError::transport(format!("relay {}", mail.smtp_host), e.to_string()))?
            .port(mail.smtp_port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(Duration::from_secs(mail.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from,
            to,
            relay: format!("{}:{}", mail.smtp_host, mail.smtp_port),
        })
    }
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("relay", &self.relay)
            .finish_non_exhaustive()
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        let message = build_message(&self.from, &self.to, notification)?;
        let response = self
            .transport
            .send(&message)
            .with_context(|| format!("sending to {} via {}", self.to, self.relay))?;
        tracing::debug!("SMTP server accepted message: {:?}", response.code());
        tracing::info!(
            "Sent notification for {} new file(s) to {}",
            notification.added.len(),
            self.to
        );
        Ok(())
    }
}
