//! Default values for dirwatch configuration.

/// Default polling interval.
pub const DEFAULT_INTERVAL: &str = "5s";

/// Longest accepted polling interval (one week).
pub const MAX_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default SMTP submission host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default SMTP connection timeout in seconds.
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 30;

/// Default cap on the size of an attached added file (10 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Default notification subject.
pub const DEFAULT_SUBJECT: &str = "New files detected";

/// Default notification body. The added file names follow it.
pub const DEFAULT_BODY: &str = "New files appeared in the watched directory:";

/// Environment variable holding the SMTP password.
pub const PASSWORD_ENV: &str = "DIRWATCH_SMTP_PASSWORD";
