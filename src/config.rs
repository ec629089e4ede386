use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

/// Seconds a generation request may take when no timeout is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub no_health_check: bool,
    pub theme: Option<ThemeMode>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: options in `other` win, booleans are ORed.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            endpoint: other.endpoint.clone().or_else(|| self.endpoint.clone()),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            out_dir: other.out_dir.clone().or_else(|| self.out_dir.clone()),
            no_health_check: self.no_health_check || other.no_health_check,
            theme: other.theme.or(self.theme),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Request timeout; `0` disables it.
    pub fn timeout(&self) -> Option<Duration> {
        request_timeout(self.timeout_secs)
    }
}

/// Convert configured seconds to a request timeout. Unset means
/// [`DEFAULT_TIMEOUT_SECS`]; `0` means no timeout.
pub fn request_timeout(secs: Option<u64>) -> Option<Duration> {
    match secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("readme-studio").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("readme-studio")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("readme-studio").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("readme-studio")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".readmestudiorc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# readme-studio defaults (saved with --save)".to_string());
    if let Some(endpoint) = &flags.endpoint {
        lines.push(format!("--endpoint {endpoint}"));
    }
    if let Some(secs) = flags.timeout_secs {
        lines.push(format!("--timeout {secs}"));
    }
    if let Some(dir) = &flags.out_dir {
        lines.push(format!("--out-dir {}", dir.display()));
    }
    if flags.no_health_check {
        lines.push("--no-health-check".to_string());
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module knows out of a token list. Unknown tokens and
/// positional arguments are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--endpoint" | "--timeout" | "--out-dir" | "--theme" | "--log-file"
        );
        let value = if takes_value {
            match inline_value {
                Some(value) => Some(value),
                None => {
                    let next = tokens.get(i + 1).map(String::as_str);
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            }
        } else {
            None
        };

        match (name, value) {
            ("--endpoint", Some(value)) => flags.endpoint = Some(value.to_string()),
            ("--timeout", Some(value)) => {
                if let Ok(secs) = value.parse() {
                    flags.timeout_secs = Some(secs);
                }
            }
            ("--out-dir", Some(value)) => flags.out_dir = Some(PathBuf::from(value)),
            ("--theme", Some(value)) => flags.theme = parse_theme(value),
            ("--log-file", Some(value)) => flags.log_file = Some(PathBuf::from(value)),
            ("--no-health-check", _) => flags.no_health_check = true,
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
