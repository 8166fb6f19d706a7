use std::error::Error as _;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ToolPaths;
use crate::host::HostContext;
use crate::model::ClassUnit;
use crate::scratch::ScratchClass;

/// Shown when no tool root was supplied. The check runs before any scratch
/// file is created, so an unconfigured host leaves no trace on disk.
pub const TOOL_NOT_CONFIGURED_TEXT: &str =
    "javap is not configured. Set JDIS_JAVAP or JAVA_HOME to a JDK installation.";

/// Shown when the configured installation exists but could not be used.
pub const PERMISSION_DENIED_TEXT: &str =
    "Access to the configured javap was denied. Check permissions on the JDK installation.";

/// Second line of every diagnostic block.
pub const REPORT_NOTICE: &str = "Please include this block when reporting a jdis bug.";

/// Third line of every diagnostic block.
pub const SUGGESTED_FIX: &str =
    "Suggested fix: verify the class file is valid and the configured JDK can read it.";

/// How a tool entry point finished when it did not hard-fail.
///
/// Some tools signal normal completion in more than one way; every shape a
/// backend maps into this enum is treated as success by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The tool exited cleanly.
    Completed,
    /// The tool exited nonzero but its stderr held only warning chatter.
    /// Some javap releases finish a complete listing this way, so backends
    /// report it as a terminal signal rather than an error.
    WarningExit { status: String },
}

/// Failures observed while preparing for or running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The scratch class file backing the invocation could not be written.
    #[error("could not write scratch class file: {0}")]
    Scratch(#[source] io::Error),
    /// The tool's entry point could not be launched.
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The operating system refused access to the entry point.
    #[error("access to {tool} was denied: {source}")]
    AccessDenied {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The tool ran but exited outside its benign set.
    #[error("tool exited abnormally ({status})\n{detail}")]
    Exit { status: String, detail: String },
    /// Reading the tool's output streams failed mid-run.
    #[error("could not read tool output: {0}")]
    Pipe(#[source] io::Error),
}

/// Terminal outcome of one disassembly invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum InvocationResult {
    /// The tool ran and produced a listing.
    Success(String),
    /// No tool installation was ever configured; nothing was attempted.
    ToolNotConfigured,
    /// The configured installation was reachable but access was denied.
    PermissionDenied,
    /// Everything else, rendered as a diagnostic block for bug reports.
    Failure(String),
}

impl InvocationResult {
    /// The text a caller should surface for this outcome.
    ///
    /// Success and failure carry their own payloads; the two configuration
    /// outcomes map to fixed, actionable one-liners with no trace attached.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
            Self::ToolNotConfigured => TOOL_NOT_CONFIGURED_TEXT,
            Self::PermissionDenied => PERMISSION_DENIED_TEXT,
        }
    }

    /// Stable machine-readable name for this outcome kind, matching the
    /// serialized `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::ToolNotConfigured => "tool_not_configured",
            Self::PermissionDenied => "permission_denied",
            Self::Failure(_) => "failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Trait implemented by external disassembly tools (javap today).
///
/// `tool_root` picks this backend's installation out of the configured
/// paths; `None` means not configured and the service attempts nothing.
/// `invoke` runs the tool against a scratch class file on disk, writing the
/// listing to the host console. The tool must be resolved strictly under
/// `tool_root` so that a different or absent version installed system-wide
/// cannot interfere with the configured one.
pub trait Disassembler: Send + Sync {
    fn tool_root(&self, paths: &ToolPaths) -> Option<PathBuf>;

    fn invoke(
        &self,
        host: &HostContext,
        tool_root: &Path,
        class_file: &Path,
    ) -> Result<Termination, ToolError>;

    fn name(&self) -> &'static str;
}

/// Map a tool failure to its terminal outcome. Total: every error lands in
/// exactly one kind, never a silent drop.
pub fn classify(backend: &str, unit: &ClassUnit, err: &ToolError) -> InvocationResult {
    match err {
        ToolError::AccessDenied { .. } => InvocationResult::PermissionDenied,
        _ => InvocationResult::Failure(render_diagnostic(backend, unit, err)),
    }
}

/// Fixed-shape diagnostic block: backend header, report notice, suggested
/// fix, then the error with its cause chain.
fn render_diagnostic(backend: &str, unit: &ClassUnit, err: &ToolError) -> String {
    let mut out = format!("{backend} backend error while disassembling {}!\n", unit.name());
    out.push_str(REPORT_NOTICE);
    out.push('\n');
    out.push_str(SUGGESTED_FIX);
    out.push_str("\n\n");
    out.push_str(&format!("error: {err}\n"));
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("caused by: {cause}\n"));
        source = cause.source();
    }
    out
}

/// Coordinator that walks one class through scratch preparation, tool
/// launch, output capture, and cleanup.
///
/// Invocations are serialized through [`HostContext::serialize`]: the
/// console and audit gate are process-scoped and non-reentrant, so a second
/// caller blocks until the first has finished cleanup. Calls are synchronous
/// and non-cancellable; a caller wanting a timeout must bound its own wait.
pub struct DisassemblyService<'a> {
    pub host: &'a HostContext,
    pub backend: &'a dyn Disassembler,
}

impl DisassemblyService<'_> {
    /// Disassemble one class and return the terminal outcome.
    ///
    /// Cleanup runs on every exit in a fixed order: the capture is drained,
    /// the audit gate is lifted, and only then is the scratch file removed,
    /// so the shared channel and gate are restored even if removal fails.
    /// A failed removal is logged and ignored; it never masks the result.
    pub fn disassemble(&self, unit: &ClassUnit, tools: &ToolPaths) -> InvocationResult {
        let tool_root = match self.backend.tool_root(tools) {
            Some(root) => root,
            None => return InvocationResult::ToolNotConfigured,
        };

        let _window = self.host.serialize();

        tracing::debug!(class = unit.name(), backend = self.backend.name(), "disassembling");

        let scratch = match ScratchClass::create_in(self.host.scratch_dir(), unit.bytes()) {
            Ok(scratch) => scratch,
            Err(err) => return classify(self.backend.name(), unit, &ToolError::Scratch(err)),
        };

        // Both guards restore their state when dropped, so an unwinding
        // backend cannot leave the console redirected or the gate set.
        let capture = self.host.console().begin_capture();
        let quiet = self.host.audit().silenced();

        let outcome = self.backend.invoke(self.host, &tool_root, scratch.path());

        let listing = capture.finish();
        drop(quiet);
        if let Err(err) = scratch.remove() {
            tracing::warn!(error = %err, "scratch class file was not removed");
        }

        match outcome {
            Ok(Termination::Completed) => InvocationResult::Success(listing),
            Ok(Termination::WarningExit { status }) => {
                tracing::debug!(%status, "tool exited with warnings only");
                InvocationResult::Success(listing)
            }
            Err(err) => classify(self.backend.name(), unit, &err),
        }
    }
}
