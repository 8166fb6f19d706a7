use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::Serialize;

use jdis_core::host::HostContext;
use jdis_core::model::ClassUnit;
use jdis_core::services::backends::JavapDisassembler;
use jdis_core::services::disassembly::DisassemblyService;

use crate::{load_config, resolve_config_path, resolve_tool_paths, sha256_bytes};

/// JSON payload emitted by `dump --json`.
#[derive(Debug, Serialize)]
pub struct DumpReport {
    pub status: &'static str,
    pub class: String,
    pub sha256: String,
    pub generated_at: String,
    pub text: String,
}

/// Disassemble one compiled class file with the configured javap.
///
/// Prints the raw listing (or the diagnostic block) on stdout; every
/// non-success outcome also exits nonzero so scripts can branch on it.
pub fn dump_command(
    class_file: &str,
    tool_root: Option<String>,
    config: Option<String>,
    json: bool,
) -> Result<()> {
    let class_path = Path::new(class_file);
    let bytes = fs::read(class_path)
        .with_context(|| format!("Failed to read class file {}", class_path.display()))?;
    let name =
        class_path.file_stem().and_then(|s| s.to_str()).unwrap_or(class_file).to_string();
    let unit = ClassUnit::new(name, bytes);

    let config_path = resolve_config_path(config.as_deref())?;
    let file_config = load_config(&config_path)?;
    let tools = resolve_tool_paths(tool_root.as_deref().map(Path::new), &file_config);

    let host = HostContext::new();
    let backend = JavapDisassembler;
    let service = DisassemblyService { host: &host, backend: &backend };
    let result = service.disassemble(&unit, &tools);

    if json {
        let report = DumpReport {
            status: result.status(),
            class: unit.name().to_string(),
            // Fingerprint of the bytes that were dumped, not the file as it
            // is on disk now.
            sha256: sha256_bytes(unit.bytes()),
            generated_at: Utc::now().to_rfc3339(),
            text: result.text().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", result.text());
    }

    if !result.is_success() {
        return Err(anyhow!(
            "Disassembly of {} did not succeed ({})",
            unit.name(),
            result.status()
        ));
    }

    Ok(())
}
