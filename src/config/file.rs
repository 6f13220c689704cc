//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ConfigOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".dirwatch.yaml",
    ".dirwatch.yml",
    "dirwatch.yaml",
    "dirwatch.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/dirwatch/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs.push(config_dir.join("dirwatch"));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from an explicit or discovered file, or return defaults.
///
/// An explicit path that does not exist or fails to parse is an error.
/// A discovered file that fails to parse is also an error, since silently
/// falling back to defaults would drop the user's credentials and addresses.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(ConfigFileError::NotFound(path.to_path_buf()));
        }
    }

    match discover_config_file(explicit_path) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Apply command-line overrides; every value that was given wins.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        fn set<T: Clone>(target: &mut T, value: Option<&T>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        // Watch settings
        if overrides.dir.is_some() {
            self.watch.dir.clone_from(&overrides.dir);
        }
        set(&mut self.watch.interval, overrides.interval.as_ref());
        set(&mut self.watch.exit_on_change, overrides.exit_on_change.as_ref());

        // Mail settings
        set(&mut self.mail.enabled, overrides.mail_enabled.as_ref());
        set(&mut self.mail.smtp_host, overrides.smtp_host.as_ref());
        set(&mut self.mail.smtp_port, overrides.smtp_port.as_ref());
        for (target, value) in [
            (&mut self.mail.from, &overrides.from),
            (&mut self.mail.to, &overrides.to),
            (&mut self.mail.username, &overrides.username),
            (&mut self.mail.password, &overrides.password),
        ] {
            if value.is_some() {
                target.clone_from(value);
            }
        }
        set(&mut self.mail.subject, overrides.subject.as_ref());
        if overrides.attachment.is_some() {
            self.mail.attachment.clone_from(&overrides.attachment);
        }
        set(
            &mut self.mail.attach_added_files,
            overrides.attach_added_files.as_ref(),
        );

        // Output settings
        set(&mut self.output.format, overrides.format.as_ref());
        if overrides.output_file.is_some() {
            self.output.file.clone_from(&overrides.output_file);
        }
        set(&mut self.output.quiet, overrides.quiet.as_ref());
    }

    /// Load from file and apply CLI overrides on top.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.apply_overrides(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# dirwatch configuration file
# ============================
#
# Place this file at:
#   - .dirwatch.yaml in the directory you start dirwatch from
#   - ~/.config/dirwatch/dirwatch.yaml for a per-user config
#
# CLI arguments always override file settings.

watch:
  # Directory to poll (flat listing, hidden files included)
  dir: /srv/incoming
  # Polling interval: 500ms, 5s, 1m, ...
  interval: 5s
  # Stop after the first change (useful in scripts)
  exit_on_change: false

mail:
  # Set to false to only log notifications
  enabled: true
  smtp_host: smtp.gmail.com
  smtp_port: 587
  from: watcher@example.com
  to: you@example.com
  username: watcher@example.com
  # The password is read from DIRWATCH_SMTP_PASSWORD; avoid storing it here.
  subject: New files detected
  body: 'New files appeared in the watched directory:'
  # Fixed file attached to every message
  # attachment: /path/to/file
  # Attach the newly added files themselves
  attach_added_files: false
  max_attachment_bytes: 10485760
  timeout_secs: 30

output:
  # text: 'Added: ...' lines on stdout, json: NDJSON events
  format: text
  # file: events.ndjson
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".dirwatch.yaml");
        std::fs::write(&config_path, "watch:\n  interval: 2s\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
watch:
  dir: /srv/incoming
  interval: 2s
mail:
  from: watcher@example.com
  to: you@example.com
  attach_added_files: true
output:
  format: json
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.watch.dir, Some(PathBuf::from("/srv/incoming")));
        assert_eq!(config.watch.interval, "2s");
        assert_eq!(config.mail.from.as_deref(), Some("watcher@example.com"));
        assert!(config.mail.attach_added_files);
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "watch: [unclosed").unwrap();

        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let result = load_or_default(Some(Path::new("/nonexistent/dirwatch.yaml")));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let mut base = AppConfig::default();
        base.mail.from = Some("file@example.com".to_string());
        base.mail.to = Some("file-to@example.com".to_string());

        let overrides = ConfigOverrides {
            dir: Some(PathBuf::from("/data/drop")),
            interval: Some("1s".to_string()),
            to: Some("cli@example.com".to_string()),
            quiet: Some(true),
            ..ConfigOverrides::default()
        };

        base.apply_overrides(&overrides);

        assert_eq!(base.watch.dir, Some(PathBuf::from("/data/drop")));
        assert_eq!(base.watch.interval, "1s");
        assert_eq!(base.mail.from.as_deref(), Some("file@example.com"));
        assert_eq!(base.mail.to.as_deref(), Some("cli@example.com"));
        assert!(base.output.quiet);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut base = AppConfig::default();
        base.watch.interval = "30s".to_string();
        base.mail.smtp_port = 2525;
        base.mail.enabled = false;

        base.apply_overrides(&ConfigOverrides::default());

        assert_eq!(base.watch.interval, "30s");
        assert_eq!(base.mail.smtp_port, 2525);
        assert!(!base.mail.enabled);
    }

    #[test]
    fn test_overrides_equal_to_defaults_still_win() {
        let mut base = AppConfig::default();
        base.watch.interval = "30s".to_string();
        base.mail.smtp_port = 2525;
        base.mail.subject = "Drop folder".to_string();
        base.output.format = OutputFormat::Json;

        let overrides = ConfigOverrides {
            interval: Some("5s".to_string()),
            smtp_port: Some(587),
            subject: Some("New files detected".to_string()),
            format: Some(OutputFormat::Text),
            ..ConfigOverrides::default()
        };
        base.apply_overrides(&overrides);

        assert_eq!(base.watch.interval, "5s");
        assert_eq!(base.mail.smtp_port, 587);
        assert_eq!(base.mail.subject, "New files detected");
        assert_eq!(base.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_password_is_never_serialized() {
        let mut config = AppConfig::default();
        config.mail.password = Some("hunter2".to_string());

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("hunter2"));
        assert!(!yaml.contains("password"));
    }

    #[test]
    fn test_generated_example_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert_eq!(config.watch.dir, Some(PathBuf::from("/srv/incoming")));
        assert_eq!(config.watch.interval, "5s");
        assert_eq!(config.mail.to.as_deref(), Some("you@example.com"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "watch:\n  interval: 1s\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
