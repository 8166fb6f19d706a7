use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::config::ToolPaths;
use crate::host::HostContext;
use crate::services::disassembly::{Disassembler, Termination, ToolError};

/// Arguments passed ahead of the class file path: every member visibility,
/// the per-instruction listing, and static final constant values.
pub const JAVAP_ARGS: [&str; 3] = ["-p", "-c", "-constants"];

/// How many trailing stderr lines are kept in an abnormal-exit diagnostic.
const STDERR_TAIL_LINES: usize = 20;

/// Backend that shells out to the `javap` disassembler shipped with a JDK.
pub struct JavapDisassembler;

impl Disassembler for JavapDisassembler {
    fn tool_root(&self, paths: &ToolPaths) -> Option<PathBuf> {
        paths.javap.clone()
    }

    fn invoke(
        &self,
        host: &HostContext,
        tool_root: &Path,
        class_file: &Path,
    ) -> Result<Termination, ToolError> {
        let tool = resolve_entry_point(tool_root);
        host.audit_exec(&tool);
        launch(host, &tool, class_file)
    }

    fn name(&self) -> &'static str {
        "javap"
    }
}

/// Resolve the javap executable strictly under `tool_root`.
///
/// A root naming a file is taken as the executable itself; a directory gets
/// the conventional `bin/javap` appended. `PATH` is never consulted here,
/// so a javap installed elsewhere on the machine cannot shadow the
/// configured one.
pub fn resolve_entry_point(tool_root: &Path) -> PathBuf {
    if tool_root.is_file() {
        tool_root.to_path_buf()
    } else {
        tool_root.join("bin").join(javap_executable())
    }
}

fn javap_executable() -> &'static str {
    if cfg!(windows) {
        "javap.exe"
    } else {
        "javap"
    }
}

/// Run the tool, pumping its stdout into the host console as it arrives.
///
/// The child inherits the host's environment rather than a scrubbed one.
/// Stderr is collected separately for exit classification and never reaches
/// the console, so warning chatter cannot end up inside a listing.
fn launch(host: &HostContext, tool: &Path, class_file: &Path) -> Result<Termination, ToolError> {
    let mut child = Command::new(tool)
        .args(JAVAP_ARGS)
        .arg(class_file)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| match source.kind() {
            io::ErrorKind::PermissionDenied => {
                ToolError::AccessDenied { tool: tool.to_path_buf(), source }
            }
            _ => ToolError::Spawn { tool: tool.to_path_buf(), source },
        })?;

    let mut stderr = child.stderr.take().ok_or_else(missing_stream)?;
    let stderr_pump = thread::spawn(move || {
        let mut text = String::new();
        let _ = stderr.read_to_string(&mut text);
        text
    });

    // Stream the listing through in chunks; large classes produce output
    // well past what a single buffer read should hold back.
    let mut stdout = child.stdout.take().ok_or_else(missing_stream)?;
    let pumped = pump_listing(host, &mut stdout);
    // Our end of the pipe must be closed before waiting: after a failed
    // pump the child may still be writing, and an undrained pipe would keep
    // it from ever exiting.
    drop(stdout);

    // The child is waited on even when the pump failed, so no zombie
    // outlives the invocation.
    let waited = child.wait().map_err(ToolError::Pipe);
    let stderr_text = stderr_pump.join().unwrap_or_default();
    pumped?;
    let status = waited?;

    if status.success() {
        Ok(Termination::Completed)
    } else if warnings_only(&stderr_text) {
        // javap on some JDK releases exits nonzero after printing a full
        // listing when it only had warnings to report. That shape is part
        // of its completion contract, not a failure.
        Ok(Termination::WarningExit { status: status.to_string() })
    } else {
        Err(ToolError::Exit { status: status.to_string(), detail: stderr_tail(&stderr_text) })
    }
}

/// Copy a tool's listing into the host console until EOF.
///
/// Interrupted reads are retried, per `Read::read`'s contract; any other
/// read error ends the pump.
pub fn pump_listing(host: &HostContext, reader: &mut impl Read) -> Result<(), ToolError> {
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => host.console().write_all(&chunk[..n]),
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(ToolError::Pipe(err)),
        }
    }
}

fn missing_stream() -> ToolError {
    ToolError::Pipe(io::Error::new(io::ErrorKind::BrokenPipe, "child stream missing"))
}

/// True when stderr holds at least one line and nothing but warnings.
fn warnings_only(stderr: &str) -> bool {
    let mut lines = stderr.lines().filter(|line| !line.trim().is_empty());
    let Some(first) = lines.next() else {
        return false;
    };
    std::iter::once(first).chain(lines).all(|line| {
        let line = line.trim_start();
        line.starts_with("Warning:") || line.starts_with("warning:")
    })
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    if lines.is_empty() {
        return "(no stderr output)".to_string();
    }
    let skip = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[skip..].join("\n")
}
