//! Externally supplied tool locations.
//!
//! The disassembly service treats these as read-only state owned by the
//! caller's environment. An absent path is the checked-first "tool not
//! configured" condition, not an error, so nothing here probes the
//! filesystem: a configured-but-bogus path must surface through the
//! invocation pipeline, where it can be classified.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable naming a javap executable directly.
pub const ENV_JAVAP: &str = "JDIS_JAVAP";

/// Environment variable naming a JDK installation root.
pub const ENV_JAVA_HOME: &str = "JAVA_HOME";

/// Configured locations of external tool installations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    /// JDK installation root, or a direct path to the javap executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javap: Option<PathBuf>,
}

impl ToolPaths {
    /// Resolve tool locations from the environment.
    ///
    /// Precedence:
    /// - `JDIS_JAVAP` pointing directly at the executable.
    /// - `JAVA_HOME` naming the installation root.
    pub fn from_env() -> Self {
        let javap = env::var_os(ENV_JAVAP)
            .map(PathBuf::from)
            .or_else(|| env::var_os(ENV_JAVA_HOME).map(PathBuf::from));
        Self { javap }
    }

    /// Overlay two sources: entries in `self` win, `fallback` fills gaps.
    pub fn or(self, fallback: ToolPaths) -> Self {
        Self { javap: self.javap.or(fallback.javap) }
    }

    pub fn is_configured(&self) -> bool {
        self.javap.is_some()
    }
}
