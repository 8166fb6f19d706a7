//! jdis-core
//!
//! Core library for javap-backed disassembly of compiled Java classes.
//!
//! This crate owns the whole invocation pipeline: the class-unit model, the
//! host context (shared console, audit gate, scratch directory), the
//! ephemeral class file handed to the external tool, the backend capability
//! and its javap implementation, and the orchestrating service that
//! classifies every outcome.
//!
//! The goal is to keep all substantive logic here so it is fully testable
//! and reusable from multiple frontends (CLI, editor integrations, etc.).

pub mod config;
pub mod host;
pub mod model;
pub mod scratch;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
