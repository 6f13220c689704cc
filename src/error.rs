//! Unified error types for dirwatch.
//!
//! Library-level operations (snapshots, notification delivery) return
//! [`DirwatchError`]. The CLI and the watch loop wrap these in
//! `anyhow` at the top.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dirwatch operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DirwatchError {
    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors while composing or delivering a notification
    #[error("Notification failed: {context}")]
    Notify {
        context: String,
        #[source]
        source: NotifyErrorKind,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific notification error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotifyErrorKind {
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Cannot read attachment {}: {reason}", .path.display())]
    Attachment { path: PathBuf, reason: String },

    #[error("Message construction failed: {0}")]
    Build(String),

    #[error("Mail transport error: {0}")]
    Transport(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for dirwatch operations
pub type Result<T> = std::result::Result<T, DirwatchError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DirwatchError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a notification error with context
    pub fn notify(context: impl Into<String>, source: NotifyErrorKind) -> Self {
        Self::Notify {
            context: context.into(),
            source,
        }
    }

    /// Create a transport-level notification error
    pub fn transport(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notify(context, NotifyErrorKind::Transport(message.into()))
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DirwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<lettre::error::Error> for DirwatchError {
    fn from(err: lettre::error::Error) -> Self {
        Self::notify("building message", NotifyErrorKind::Build(err.to_string()))
    }
}

impl From<lettre::transport::smtp::Error> for DirwatchError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::transport("smtp", err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is chained, outermost first:
///
/// ```ignore
/// use dirwatch::error::ErrorContext;
///
/// let bytes = std::fs::read(path)
///     .with_context(|| format!("reading attachment {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DirwatchError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DirwatchError, new_ctx: &str) -> DirwatchError {
    match err {
        DirwatchError::Io {
            path,
            message,
            source,
        } => DirwatchError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DirwatchError::Notify {
            context: existing,
            source,
        } => DirwatchError::Notify {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DirwatchError::Validation(msg) => DirwatchError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a validation error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| DirwatchError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = DirwatchError::io("/srv/incoming", io_err);

        let display = err.to_string();
        assert!(display.contains("/srv/incoming"), "{display}");
        assert!(display.contains("no such directory"), "{display}");
    }

    #[test]
    fn test_notify_error_display() {
        let err = DirwatchError::notify(
            "parsing sender",
            NotifyErrorKind::InvalidAddress {
                address: "not-an-address".to_string(),
                reason: "missing domain".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Notification failed: parsing sender");

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Invalid mail address 'not-an-address': missing domain")
        );
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(DirwatchError::transport("connect", "connection refused"))
        }

        fn middle() -> Result<()> {
            inner().context("sending notification")
        }

        fn outer() -> Result<()> {
            middle().context("iteration 3")
        }

        match outer() {
            Err(DirwatchError::Notify { context, .. }) => {
                assert_eq!(context, "iteration 3: sending notification: connect");
            }
            other => panic!("Expected Notify error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_on_io_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        match result.context("reading watch directory") {
            Err(DirwatchError::Io { message, path, .. }) => {
                assert_eq!(message, "reading watch directory: denied");
                assert!(path.is_none());
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(DirwatchError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        assert_eq!(Some(7).context_none("missing").unwrap(), 7);

        match None::<i32>.context_none("mail.to is not set") {
            Err(DirwatchError::Validation(msg)) => assert_eq!(msg, "mail.to is not set"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
