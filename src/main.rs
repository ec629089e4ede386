//! readme-studio - generate, edit and export GitHub profile READMEs in the terminal.
//!
//! # Usage
//!
//! ```bash
//! readme-studio
//! readme-studio octocat
//! readme-studio --endpoint http://localhost:5000/generate --timeout 120
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use readme_studio::app::App;
use readme_studio::client::{DEFAULT_ENDPOINT, HttpGenerationClient};
use readme_studio::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, request_timeout, save_config_flags,
};
use readme_studio::ui::style::Background;

/// Generate, edit and export GitHub profile READMEs
#[derive(Parser, Debug)]
#[command(name = "readme-studio", version, about, long_about = None)]
struct Cli {
    /// GitHub username to pre-fill
    #[arg(value_name = "USERNAME")]
    username: Option<String>,

    /// Generation endpoint [default: http://127.0.0.1:5000/generate]
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds, 0 disables it [default: 60]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Directory markdown exports are written to
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Skip the startup health check
    #[arg(long)]
    no_health_check: bool,

    /// Force the color theme (light or dark)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Write log events to a file (they are discarded otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Where log events go. Stderr shares the terminal with the TUI, so without
/// `--log-file` events are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Discard,
    File(PathBuf),
}

impl LogTarget {
    fn for_flag(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Discard, |path| Self::File(path.to_path_buf()))
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        match self {
            Self::Discard => Ok(BoxMakeWriter::new(std::io::sink)),
            Self::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    let writer = LogTarget::for_flag(log_file).writer()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_file = effective.log_file.clone().or(cli.log_file);
    init_logging(log_file.as_deref())?;
    tracing::debug!(?effective, "effective configuration");

    let endpoint = effective
        .endpoint
        .clone()
        .or(cli.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let timeout = request_timeout(effective.timeout_secs.or(cli.timeout));
    let client = HttpGenerationClient::new(&endpoint, timeout)
        .with_context(|| format!("Invalid endpoint {endpoint}"))?;

    let background = match effective.theme.or(cli.theme).unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => Background::detect(),
        ThemeMode::Light => Background::Light,
        ThemeMode::Dark => Background::Dark,
    };

    let mut app = App::new(Arc::new(client))
        .with_username(cli.username)
        .with_out_dir(
            effective
                .out_dir
                .clone()
                .or(cli.out_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        )
        .with_health_check(!(effective.no_health_check || cli.no_health_check))
        .with_background(background)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
