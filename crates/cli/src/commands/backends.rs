use anyhow::Result;
use serde::Serialize;

use jdis_core::config::ToolPaths;
use jdis_core::services::backends::javap::resolve_entry_point;

use crate::{load_config, resolve_config_path, resolve_tool_paths, JdisConfig};

/// One row in the backend listing.
#[derive(Debug, Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// List the disassembler backends known to this binary and whether each one
/// is configured.
pub fn list_backends_command(config: Option<String>, json: bool) -> Result<()> {
    let config_path = resolve_config_path(config.as_deref())?;
    let file_config = load_config(&config_path)?;
    let tools = resolve_tool_paths(None, &file_config);

    let entries = vec![javap_info(&tools, &file_config)];

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Backends:");
    for entry in entries {
        if entry.configured {
            let entry_point = entry.entry_point.as_deref().unwrap_or("?");
            match entry.version {
                Some(v) => println!("- {}: configured, entry point {} ({})", entry.name, entry_point, v),
                None => println!("- {}: configured, entry point {}", entry.name, entry_point),
            }
        } else {
            println!(
                "- {}: not configured (run `jdis setup`, or set JDIS_JAVAP or JAVA_HOME)",
                entry.name
            );
        }
    }

    Ok(())
}

fn javap_info(tools: &ToolPaths, file_config: &JdisConfig) -> BackendInfo {
    let entry_point =
        tools.javap.as_deref().map(|root| resolve_entry_point(root).display().to_string());
    BackendInfo {
        name: "javap".to_string(),
        configured: entry_point.is_some(),
        entry_point,
        version: file_config.javap_version.clone(),
    }
}
