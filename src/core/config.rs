//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.querychat/config.toml` unless `--config` points
//! elsewhere. If the default file is missing on first run, a commented-out
//! template is generated so users can discover all options.

use clap::ValueEnum;
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ReplyOrder;
use crate::query::DEFAULT_ENDPOINT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QueryChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub reply_order: Option<ReplyOrder>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub reply_order: Option<ReplyOrder>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const ENV_ENDPOINT: &str = "QUERYCHAT_ENDPOINT";
pub const ENV_REPLY_ORDER: &str = "QUERYCHAT_REPLY_ORDER";
pub const ENV_TIMEOUT_SECS: &str = "QUERYCHAT_TIMEOUT_SECS";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub reply_order: ReplyOrder,
    /// `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
    pub log_level: LevelFilter,
    /// Values that were ignored while resolving, for the caller to log once
    /// a logger is installed.
    pub warnings: Vec<String>,
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

/// Returns the path to `~/.querychat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".querychat").join("config.toml"))
}

/// Load config from `explicit` if given, else from the default location.
///
/// A missing default file is replaced by a generated template and yields
/// `QueryChatConfig::default()`. A missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<QueryChatConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(QueryChatConfig::default());
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(QueryChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<QueryChatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# querychat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# reply_order = "completion"   # "completion" (as replies arrive) or "latest" (drop superseded)
# log_level = "debug"          # "off", "error", "warn", "info", "debug", "trace"

# [server]
# endpoint = "http://127.0.0.1:8000/query/"   # Or set QUERYCHAT_ENDPOINT
# timeout_secs = 30                           # Unset or 0 = no client-side timeout
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

/// Resolve the final config from the process environment.
pub fn resolve(config: &QueryChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Resolve by collapsing: defaults → config file → `env` lookup → CLI.
///
/// Unparseable env or file values are skipped and reported in
/// [`ResolvedConfig::warnings`]. A timeout of zero seconds means no timeout.
pub fn resolve_with_env(
    config: &QueryChatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env(ENV_ENDPOINT))
        .or_else(|| config.server.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Reply order: CLI → env → config → default
    let reply_order = cli
        .reply_order
        .or_else(|| {
            env(ENV_REPLY_ORDER).and_then(|raw| match ReplyOrder::from_str(&raw, true) {
                Ok(order) => Some(order),
                Err(_) => {
                    warnings.push(format!(
                        "Ignoring {}={:?}: expected completion or latest",
                        ENV_REPLY_ORDER, raw
                    ));
                    None
                }
            })
        })
        .or(config.general.reply_order)
        .unwrap_or_default();

    // Timeout: CLI → env → config → none
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            env(ENV_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warnings.push(format!("Ignoring {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e));
                    None
                }
            })
        })
        .or(config.server.timeout_secs);

    let log_level = match config.general.log_level.as_deref() {
        None => DEFAULT_LOG_LEVEL,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warnings.push(format!("Unknown log_level {:?}, using {}", raw, DEFAULT_LOG_LEVEL));
            DEFAULT_LOG_LEVEL
        }),
    };

    ResolvedConfig {
        endpoint,
        reply_order,
        // reqwest would fail every request on a zero timeout
        timeout: timeout_secs.filter(|&secs| secs > 0).map(Duration::from_secs),
        log_level,
        warnings,
    }
}
