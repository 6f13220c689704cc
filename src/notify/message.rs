//! MIME message composition.

use super::Notification;
use crate::error::{DirwatchError, NotifyErrorKind, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

/// Build a multipart/mixed message: the plain-text body, then each readable
/// attachment as `application/octet-stream`.
///
/// A required attachment that cannot be read fails the build. Optional
/// attachments that vanished since the notification was composed are skipped.
pub fn build_message(from: &Mailbox, to: &Mailbox, notification: &Notification) -> Result<Message> {
    let octet_stream = ContentType::parse("application/octet-stream").map_err(|e| {
        DirwatchError::notify("attachment content type", NotifyErrorKind::Build(e.to_string()))
    })?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(notification.body.clone()));

    for source in &notification.attachments {
        let bytes = match std::fs::read(&source.path) {
            Ok(bytes) => bytes,
            Err(e) if source.required => {
                return Err(DirwatchError::notify(
                    "reading attachment",
                    NotifyErrorKind::Attachment {
                        path: source.path.clone(),
                        reason: e.to_string(),
                    },
                ));
            }
            Err(e) => {
                tracing::warn!("Skipping attachment {}: {e}", source.path.display());
                continue;
            }
        };

        let filename = source
            .path
            .file_name()
            .map_or_else(|| "attachment".to_string(), |n| n.to_string_lossy().into_owned());
        multipart = multipart.singlepart(Attachment::new(filename).body(bytes, octet_stream.clone()));
    }

    let message = Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(notification.subject.clone())
        .multipart(multipart)?;
    Ok(message)
}

/// Parse a configured address, naming the config field on failure.
pub(crate) fn parse_mailbox(field: &str, value: Option<&str>) -> Result<Mailbox> {
    let value = value.ok_or_else(|| DirwatchError::validation(format!("{field} is not set")))?;
    value.parse::<Mailbox>().map_err(|e| {
        DirwatchError::notify(
            format!("parsing {field}"),
            NotifyErrorKind::InvalidAddress {
                address: value.to_string(),
                reason: e.to_string(),
            },
        )
    })
}
