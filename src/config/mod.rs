//! Configuration module for dirwatch.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.dirwatch.yaml` file in the working directory or `~/.config/dirwatch/`:
//!
//! ```yaml
//! watch:
//!   dir: /srv/incoming
//!   interval: 5s
//! mail:
//!   from: watcher@example.com
//!   to: you@example.com
//!   username: watcher@example.com
//! ```
//!
//! The SMTP password comes from `DIRWATCH_SMTP_PASSWORD`.

pub mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::PASSWORD_ENV;
pub use types::{
    AppConfig, ConfigOverrides, MailConfig, OutputConfig, OutputFormat, WatchSettings,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    search_dirs, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.dirwatch.yaml` config files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let props = &parsed["properties"];
        assert!(props.get("watch").is_some());
        assert!(props.get("mail").is_some());
        assert!(props.get("output").is_some());
    }
}
