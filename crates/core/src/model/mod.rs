//! Core data model for the class units handed to disassembly backends.

/// One compiled class as handed to a disassembler.
///
/// The bytes are read-only to this crate: they are materialized into a
/// scratch file for the external tool and never parsed here. The display
/// name exists for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassUnit {
    name: String,
    bytes: Vec<u8>,
}

impl ClassUnit {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    /// Display name used in diagnostics. Never parsed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw class file bytes, exactly as the caller supplied them.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
