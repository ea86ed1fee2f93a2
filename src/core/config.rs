//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.asset-register/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::export::{DEFAULT_REPORT_TITLE, PageGeometry};
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub print: PrintConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub page_size: Option<usize>,
    pub seed_sample_data: Option<bool>,
    pub report_title: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PrintConfig {
    pub paper: Option<String>,
    pub margin_mm: Option<u32>,
    pub settle_delay_ms: Option<u64>,
    pub command: Option<Vec<String>>,
}

/// Values taken from CLI flags. `None` / `false` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub page_size: Option<usize>,
    pub theme: Option<Theme>,
    pub no_seed: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// The platform's "open this file" command.
pub fn default_print_command() -> Vec<String> {
    if cfg!(target_os = "windows") {
        vec!["cmd".into(), "/C".into(), "start".into(), String::new()]
    } else if cfg!(target_os = "macos") {
        vec!["open".into()]
    } else {
        vec!["xdg-open".into()]
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page_size: usize,
    pub seed_sample_data: bool,
    pub report_title: String,
    pub log_level: String,
    /// Theme forced from the CLI; otherwise the stored preference wins.
    pub theme_override: Option<Theme>,
    pub print: PrintSettings,
}

/// Everything the print path needs: page geometry, settling delay, command.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintSettings {
    pub geometry: PageGeometry,
    pub settle_delay: Duration,
    pub command: Vec<String>,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            command: default_print_command(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.asset-register/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".asset-register"))
}

/// Returns the path to `~/.asset-register/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.asset-register/config.toml`, or from `explicit` when
/// given on the command line.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `RegisterConfig::default()`. An explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<RegisterConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RegisterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RegisterConfig::default());
    }

    load_from(&path)
}

fn load_from(path: &Path) -> Result<RegisterConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RegisterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Asset Register Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# page_size = 5                        # Or set ASSET_REGISTER_PAGE_SIZE
# seed_sample_data = true              # Start with two sample records
# report_title = "รายงานทะเบียนครุภัณฑ์"
# log_level = "debug"                  # "error", "warn", "info", "debug", "trace"

# [print]
# paper = "A4"                         # CSS @page size
# margin_mm = 20
# settle_delay_ms = 500                # Wait before handing off to the print command
# command = ["xdg-open"]               # Or set ASSET_REGISTER_PRINT_COMMAND
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RegisterConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Page size: CLI → env → config → default
    let page_size = cli
        .page_size
        .or_else(|| {
            std::env::var("ASSET_REGISTER_PAGE_SIZE")
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .or(config.general.page_size)
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    // Seeding: --no-seed wins, then config
    let seed_sample_data = !cli.no_seed && config.general.seed_sample_data.unwrap_or(true);

    // Print command: env (whitespace-separated) → config → platform default
    let command = std::env::var("ASSET_REGISTER_PRINT_COMMAND")
        .ok()
        .map(|v| v.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .filter(|c| !c.is_empty())
        .or_else(|| config.print.command.clone())
        .unwrap_or_else(default_print_command);

    let defaults = PageGeometry::default();
    let geometry = PageGeometry {
        paper: config.print.paper.clone().unwrap_or(defaults.paper),
        margin_mm: config.print.margin_mm.unwrap_or(defaults.margin_mm),
    };

    ResolvedConfig {
        page_size,
        seed_sample_data,
        report_title: config
            .general
            .report_title
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string()),
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        theme_override: cli.theme,
        print: PrintSettings {
            geometry,
            settle_delay: Duration::from_millis(
                config
                    .print
                    .settle_delay_ms
                    .unwrap_or(DEFAULT_SETTLE_DELAY_MS),
            ),
            command,
        },
    }
}
