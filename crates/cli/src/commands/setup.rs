use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Result};

use jdis_core::config::{ToolPaths, ENV_JAVAP, ENV_JAVA_HOME};
use jdis_core::services::backends::javap::resolve_entry_point;

use crate::{load_config, resolve_config_path, save_config};

/// Locate a javap installation, validate it, and record it in the config
/// file so `dump` can find it without environment variables.
pub fn setup_command(path: Option<String>, config: Option<String>) -> Result<()> {
    let root = path
        .map(PathBuf::from)
        .or_else(|| ToolPaths::from_env().javap)
        .or_else(find_javap_in_path)
        .ok_or_else(|| {
            anyhow!(
                "Could not find javap. Pass --path <javap or JDK root>, or set {ENV_JAVAP} or {ENV_JAVA_HOME}"
            )
        })?;

    let entry_point = resolve_entry_point(&root);
    if !entry_point.is_file() {
        return Err(anyhow!("javap not found at {}", entry_point.display()));
    }
    println!("Found javap at {}", entry_point.display());

    let version = detect_javap_version(&entry_point);
    match &version {
        Some(v) => println!("Detected version: {v}"),
        None => println!("Could not detect javap version (continuing anyway)"),
    }

    let config_path = resolve_config_path(config.as_deref())?;
    let mut file_config = load_config(&config_path)?;
    file_config.javap = Some(root.to_string_lossy().to_string());
    file_config.javap_version = version;
    save_config(&config_path, &file_config)?;
    println!("Updated config at {}", config_path.display());

    Ok(())
}

/// Search `PATH` for a javap executable.
///
/// Setup is the one place a `PATH` lookup is allowed; invocation itself only
/// ever launches the configured location.
fn find_javap_in_path() -> Option<PathBuf> {
    let executable = if cfg!(windows) { "javap.exe" } else { "javap" };
    env::var_os("PATH").and_then(|paths| {
        env::split_paths(&paths).find_map(|p| {
            let candidate = p.join(executable);
            if candidate.is_file() {
                Some(candidate)
            } else {
                None
            }
        })
    })
}

/// Ask the resolved executable for its version string (`javap -version`).
fn detect_javap_version(javap: &Path) -> Option<String> {
    Command::new(javap).arg("-version").output().ok().and_then(|out| {
        if out.status.success() {
            let s = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        } else {
            None
        }
    })
}
