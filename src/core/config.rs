//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.responder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::generation::providers::trpc;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ResponderConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub form: FormDefaults,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
    pub namespace: Option<String>,
    pub procedure: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FormDefaults {
    pub default_mood: Option<String>,
    pub default_length: Option<String>,
    pub default_type: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub procedure: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_NAMESPACE: &str = "trpc";
pub const DEFAULT_PROCEDURE: &str = "event.hello";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub namespace: String,
    pub procedure: String,
    pub timeout: Duration,
    pub default_mood: Option<String>,
    pub default_length: Option<String>,
    pub default_type: Option<String>,
}

impl ResolvedConfig {
    pub fn endpoint_url(&self) -> String {
        trpc::endpoint_url(&self.base_url, &self.namespace, &self.procedure)
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

/// Returns the path to `~/.responder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".responder").join("config.toml"))
}

/// Load config from `~/.responder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ResponderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ResponderConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ResponderConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ResponderConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ResponderConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ResponderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Responder Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [endpoint]
# base_url = "http://localhost:3000"   # Or set RESPONDER_BASE_URL
# namespace = "trpc"                   # GET {base_url}/api/{namespace}/{procedure}
# procedure = "event.hello"            # Or set RESPONDER_PROCEDURE
# timeout_secs = 60

# [form]
# default_mood = "😊 Happy"           # 😊 Happy, 🙃 Condescending, 😡 Angry, 🤢 Sickly
# default_length = "📄 Short"         # 📄 Short, 📕 Medium, 📚 Long
# default_type = "💼 Normal"          # 💼 Normal, 📜 Poem, 🎵 Song, 🎨 Story
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
pub fn resolve(config: &ResponderConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("RESPONDER_BASE_URL").ok())
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Procedure: CLI → env → config → default
    let procedure = cli
        .procedure
        .clone()
        .or_else(|| std::env::var("RESPONDER_PROCEDURE").ok())
        .or_else(|| config.endpoint.procedure.clone())
        .unwrap_or_else(|| DEFAULT_PROCEDURE.to_string());

    // Timeout: CLI → config → default; 0 counts as unset
    let timeout_secs = nonzero_timeout("--timeout", cli.timeout_secs)
        .or_else(|| nonzero_timeout("timeout_secs", config.endpoint.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        namespace: config
            .endpoint
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        procedure,
        timeout: Duration::from_secs(timeout_secs),
        default_mood: config.form.default_mood.clone(),
        default_length: config.form.default_length.clone(),
        default_type: config.form.default_type.clone(),
    }
}

fn nonzero_timeout(source: &str, secs: Option<u64>) -> Option<u64> {
    match secs {
        Some(0) => {
            warn!("Ignoring {} = 0, a zero timeout would fail every request", source);
            None
        }
        other => other,
    }
}
