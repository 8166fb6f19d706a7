use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use jdis_core::config::ToolPaths;

pub mod commands;

/// Version written into freshly created config files.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Persisted CLI configuration (`~/.jdis.json` unless overridden).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdisConfig {
    pub config_version: u32,
    /// JDK installation root or direct javap path, as a display string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javap: Option<String>,
    /// Version string detected at setup time, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javap_version: Option<String>,
}

impl JdisConfig {
    pub fn new() -> Self {
        Self { config_version: CURRENT_CONFIG_VERSION, javap: None, javap_version: None }
    }
}

impl Default for JdisConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Default config file location: `~/.jdis.json` (`%USERPROFILE%` on Windows).
pub fn default_config_path() -> Result<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let home =
        env::var_os(var).ok_or_else(|| anyhow!("{var} is not set; pass --config <FILE>"))?;
    Ok(PathBuf::from(home).join(".jdis.json"))
}

/// Config file location for one run: an explicit `--config` wins, otherwise
/// the per-user default.
pub fn resolve_config_path(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(p) => Ok(PathBuf::from(p)),
        None => default_config_path(),
    }
}

/// Load the config file, treating a missing file as an empty config so
/// first runs work without a setup step.
pub fn load_config(path: &Path) -> Result<JdisConfig> {
    if !path.is_file() {
        return Ok(JdisConfig::new());
    }
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse config JSON at {}", path.display()))
}

pub fn save_config(path: &Path, config: &JdisConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Resolve tool locations for one invocation.
///
/// Precedence: explicit `--tool-root` flag, then environment
/// (`JDIS_JAVAP`/`JAVA_HOME`), then the config file.
pub fn resolve_tool_paths(tool_root: Option<&Path>, config: &JdisConfig) -> ToolPaths {
    let flag = ToolPaths { javap: tool_root.map(Path::to_path_buf) };
    let file = ToolPaths { javap: config.javap.as_ref().map(PathBuf::from) };
    flag.or(ToolPaths::from_env()).or(file)
}

/// Compute the SHA-256 hash of a buffer and return it as a hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
