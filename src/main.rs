//! dirwatch: poll a directory and send an email when new files appear.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dirwatch::{
    cli,
    config::{self, AppConfig, ConfigOverrides, OutputFormat, PASSWORD_ENV},
    watch::WatchConfig,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dirwatch")]
#[command(version)]
#[command(about = "Poll a directory and send an email when new files appear", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Watch a drop folder, mail new arrivals (password from $DIRWATCH_SMTP_PASSWORD)
    dirwatch watch /srv/incoming --from cam@example.com --to me@example.com \\
        --username cam@example.com --attach-added

    # Only print changes, poll every second
    dirwatch watch ./inbox --no-mail -i 1s

    # Machine-readable events
    dirwatch watch ./inbox --no-mail -o json -O events.ndjson")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `watch` subcommand
#[derive(Parser)]
struct WatchArgs {
    /// Directory to watch (overrides watch.dir)
    dir: Option<PathBuf>,

    /// Polling interval (e.g., 500ms, 5s, 1m)
    #[arg(long, short = 'i')]
    interval: Option<String>,

    /// Exit after the first poll that sees a change
    #[arg(long)]
    exit_on_change: bool,

    /// Report format (text lines or NDJSON events)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Append NDJSON events to this file instead of stdout (requires -o json)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Log notifications instead of sending mail
    #[arg(long)]
    no_mail: bool,

    /// SMTP submission host
    #[arg(long)]
    smtp_host: Option<String>,

    /// SMTP submission port
    #[arg(long)]
    smtp_port: Option<u16>,

    /// Sender address
    #[arg(long)]
    from: Option<String>,

    /// Recipient address
    #[arg(long)]
    to: Option<String>,

    /// SMTP login name
    #[arg(long)]
    username: Option<String>,

    /// SMTP password
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    password: Option<String>,

    /// Message subject
    #[arg(long)]
    subject: Option<String>,

    /// File attached to every notification
    #[arg(long, value_name = "PATH")]
    attachment: Option<PathBuf>,

    /// Attach the newly added files themselves
    #[arg(long)]
    attach_added: bool,

    /// Take the initial snapshot, print it, and exit
    #[arg(long)]
    dry_run: bool,
}

impl WatchArgs {
    /// CLI values as overrides for [`AppConfig::apply_overrides`].
    ///
    /// Flags that were not given stay `None` so the config file keeps them.
    fn to_overrides(&self, quiet: bool) -> ConfigOverrides {
        ConfigOverrides {
            dir: self.dir.clone(),
            interval: self.interval.clone(),
            exit_on_change: self.exit_on_change.then_some(true),
            mail_enabled: self.no_mail.then_some(false),
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            from: self.from.clone(),
            to: self.to.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            subject: self.subject.clone(),
            attachment: self.attachment.clone(),
            attach_added_files: self.attach_added.then_some(true),
            format: self.output,
            output_file: self.output_file.clone(),
            quiet: quiet.then_some(true),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Poll a directory and notify when new files appear
    Watch(WatchArgs),

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .dirwatch.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Watch(args) => {
            let overrides = args.to_overrides(cli.quiet);
            let (app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides)?;
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            let config = WatchConfig::from_app_config(&app_config, args.dry_run)?;
            let summary = cli::run_watch(&config)?;
            tracing::debug!(
                "Session: {} polls, {} notification(s) sent, {} failed, {} read failure(s)",
                summary.iterations,
                summary.notifications_sent,
                summary.notification_failures,
                summary.read_failures
            );
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref())?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in config::search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".dirwatch.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to render schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "dirwatch", &mut io::stdout());
            Ok(())
        }
    }
}
