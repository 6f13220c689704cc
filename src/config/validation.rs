//! Configuration validation for dirwatch.
//!
//! Everything reported here is fatal at startup.

use super::defaults::MAX_INTERVAL_SECS;
use super::types::{AppConfig, MailConfig, OutputConfig, OutputFormat, WatchSettings};
use crate::watch::parse_duration;
use lettre::message::Mailbox;
use std::time::Duration;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.watch.validate());
        errors.extend(self.mail.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for WatchSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.dir.is_none() {
            errors.push(ConfigError::new("watch.dir", "no watch directory given"));
        }

        match parse_duration(&self.interval) {
            Ok(interval) if interval.is_zero() => {
                errors.push(ConfigError::new(
                    "watch.interval",
                    "interval must be greater than zero",
                ));
            }
            Ok(interval) if interval > Duration::from_secs(MAX_INTERVAL_SECS) => {
                errors.push(ConfigError::new(
                    "watch.interval",
                    format!("interval must be at most {MAX_INTERVAL_SECS}s (one week)"),
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new("watch.interval", e.to_string())),
        }

        errors
    }
}

impl Validatable for MailConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.enabled {
            return errors;
        }

        if self.smtp_host.trim().is_empty() {
            errors.push(ConfigError::new("mail.smtp_host", "SMTP host is empty"));
        }
        if self.smtp_port == 0 {
            errors.push(ConfigError::new("mail.smtp_port", "port must be non-zero"));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "mail.timeout_secs",
                "timeout must be greater than zero",
            ));
        }
        if self.subject.trim().is_empty() {
            errors.push(ConfigError::new("mail.subject", "subject is empty"));
        }

        check_address(&mut errors, "mail.from", self.from.as_deref());
        check_address(&mut errors, "mail.to", self.to.as_deref());

        if is_blank(self.username.as_deref()) {
            errors.push(ConfigError::new("mail.username", "SMTP username is not set"));
        }
        if is_blank(self.password.as_deref()) {
            errors.push(ConfigError::new(
                "mail.password",
                format!(
                    "SMTP password is not set (use {})",
                    super::defaults::PASSWORD_ENV
                ),
            ));
        }

        if let Some(ref attachment) = self.attachment {
            if !attachment.is_file() {
                errors.push(ConfigError::new(
                    "mail.attachment",
                    format!("attachment file does not exist: {}", attachment.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.file.is_some() && self.format == OutputFormat::Text {
            errors.push(ConfigError::new(
                "output.file",
                "an output file is only written in json format",
            ));
        }

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn check_address(errors: &mut Vec<ConfigError>, field: &str, value: Option<&str>) {
    match value {
        None => errors.push(ConfigError::new(field, "address is not set")),
        Some(v) if v.trim().is_empty() => {
            errors.push(ConfigError::new(field, "address is not set"));
        }
        Some(v) => {
            if let Err(e) = v.parse::<Mailbox>() {
                errors.push(ConfigError::new(field, format!("invalid address '{v}': {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn complete_mail() -> MailConfig {
        MailConfig {
            from: Some("watcher@example.com".to_string()),
            to: Some("Front Desk <desk@example.com>".to_string()),
            username: Some("watcher@example.com".to_string()),
            password: Some("hunter2".to_string()),
            ..MailConfig::default()
        }
    }

    fn fields(errors: &[ConfigError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_complete_config_is_valid() {
        let config = AppConfig {
            watch: WatchSettings {
                dir: Some(PathBuf::from("/srv/incoming")),
                ..WatchSettings::default()
            },
            mail: complete_mail(),
            ..AppConfig::default()
        };
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_missing_dir_is_reported() {
        let errors = WatchSettings::default().validate();
        assert_eq!(fields(&errors), vec!["watch.dir"]);
    }

    #[test]
    fn test_bad_interval_is_reported() {
        let settings = WatchSettings {
            dir: Some(PathBuf::from("/tmp")),
            interval: "soon".to_string(),
            exit_on_change: false,
        };
        assert_eq!(fields(&settings.validate()), vec!["watch.interval"]);

        let zero = WatchSettings {
            interval: "0s".to_string(),
            ..settings
        };
        assert_eq!(fields(&zero.validate()), vec!["watch.interval"]);
    }

    #[test]
    fn test_oversized_interval_is_reported() {
        let huge = WatchSettings {
            dir: Some(PathBuf::from("/tmp")),
            interval: "18446744073709551615s".to_string(),
            exit_on_change: false,
        };
        let errors = huge.validate();
        assert_eq!(fields(&errors), vec!["watch.interval"]);
        assert!(errors[0].message.contains("at most"), "{}", errors[0].message);

        let week = WatchSettings {
            interval: "7d".to_string(),
            ..huge
        };
        assert!(week.is_valid());
    }

    #[test]
    fn test_missing_credentials_are_fatal() {
        let errors = MailConfig::default().validate();
        let fields = fields(&errors);
        assert!(fields.contains(&"mail.from"));
        assert!(fields.contains(&"mail.to"));
        assert!(fields.contains(&"mail.username"));
        assert!(fields.contains(&"mail.password"));
    }

    #[test]
    fn test_blank_password_is_rejected() {
        let mail = MailConfig {
            password: Some("   ".to_string()),
            ..complete_mail()
        };
        assert_eq!(fields(&mail.validate()), vec!["mail.password"]);
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let mail = MailConfig {
            to: Some("not an address".to_string()),
            ..complete_mail()
        };
        let errors = mail.validate();
        assert_eq!(fields(&errors), vec!["mail.to"]);
        assert!(errors[0].message.contains("not an address"));
    }

    #[test]
    fn test_disabled_mail_skips_checks() {
        let mail = MailConfig {
            enabled: false,
            ..MailConfig::default()
        };
        assert!(mail.is_valid());
    }

    #[test]
    fn test_missing_attachment_is_rejected() {
        let mail = MailConfig {
            attachment: Some(PathBuf::from("/nonexistent/attachment.jpg")),
            ..complete_mail()
        };
        assert_eq!(fields(&mail.validate()), vec!["mail.attachment"]);
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let output = OutputConfig {
            format: OutputFormat::Json,
            file: Some(PathBuf::from("/nonexistent/dir/events.ndjson")),
            ..OutputConfig::default()
        };
        assert_eq!(fields(&output.validate()), vec!["output.file"]);
    }

    #[test]
    fn test_output_file_requires_json_format() {
        let dir = tempfile::tempdir().unwrap();
        let text = OutputConfig {
            file: Some(dir.path().join("events.log")),
            ..OutputConfig::default()
        };
        let errors = text.validate();
        assert_eq!(fields(&errors), vec!["output.file"]);
        assert!(errors[0].message.contains("json"), "{}", errors[0].message);

        let json = OutputConfig {
            format: OutputFormat::Json,
            ..text
        };
        assert!(json.is_valid());
    }
}
