//! Watch configuration and duration parsing.

use super::WatchError;
use crate::config::{AppConfig, MailConfig, OutputConfig, Validatable};
use std::path::PathBuf;
use std::time::Duration;

/// Resolved configuration for one watch session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory to poll
    pub watch_dir: PathBuf,
    /// Delay between polls
    pub poll_interval: Duration,
    /// Stop after the first iteration that sees added or removed names
    pub exit_on_change: bool,
    /// Message content and attachment settings
    pub mail: MailConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Take the baseline snapshot, print it, and exit
    pub dry_run: bool,
}

impl WatchConfig {
    /// Resolve an [`AppConfig`] into a runnable watch configuration.
    ///
    /// Runs full validation first; every problem found is reported at once.
    pub fn from_app_config(config: &AppConfig, dry_run: bool) -> Result<Self, WatchError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(WatchError::InvalidConfig(
                errors.iter().map(ToString::to_string).collect(),
            ));
        }

        let watch_dir = config.watch.dir.clone().ok_or(WatchError::MissingDir)?;

        Ok(Self {
            watch_dir,
            poll_interval: parse_duration(&config.watch.interval)?,
            exit_on_change: config.watch.exit_on_change,
            mail: config.mail.clone(),
            output: config.output.clone(),
            dry_run,
        })
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours), `d` (days).
///
/// # Examples
///
/// ```
/// use dirwatch::watch::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, WatchError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(WatchError::InvalidInterval(s.to_string()));
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with('s') || s.ends_with('m') || s.ends_with('h') || s.ends_with('d') {
        (&s[..s.len() - 1], &s[s.len() - 1..])
    } else {
        return Err(WatchError::InvalidInterval(s.to_string()));
    };

    let value: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| WatchError::InvalidInterval(s.to_string()))?;

    let secs = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| WatchError::InvalidInterval(s.to_string()))
    };

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => secs(1),
        "m" => secs(60),
        "h" => secs(3600),
        "d" => secs(86400),
        _ => Err(WatchError::InvalidInterval(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_seconds() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_duration_hours_and_days() {
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("2d").unwrap(), Duration::from_secs(172_800));
    }

    #[test]
    fn test_parse_duration_milliseconds() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_duration_with_whitespace() {
        assert_eq!(parse_duration("  10s  ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("100").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("abcs").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert!(parse_duration(&format!("{}d", u64::MAX)).is_err());
    }

    #[test]
    fn test_from_app_config_resolves_interval() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut app = AppConfig::default();
        app.watch.dir = Some(dir.path().to_path_buf());
        app.watch.interval = "250ms".to_string();
        app.mail.enabled = false;

        let config = WatchConfig::from_app_config(&app, false).unwrap();
        assert_eq!(config.watch_dir, dir.path());
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_from_app_config_collects_all_errors() {
        let mut app = AppConfig::default();
        app.watch.interval = "often".to_string();

        match WatchConfig::from_app_config(&app, false) {
            Err(WatchError::InvalidConfig(errors)) => {
                assert!(errors.iter().any(|e| e.starts_with("watch.dir")));
                assert!(errors.iter().any(|e| e.starts_with("watch.interval")));
                assert!(errors.iter().any(|e| e.starts_with("mail.password")));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
