//! Disassembly orchestration and tool adapters.
//!
//! [`disassembly`] owns the invocation pipeline: the [`Disassembler`]
//! contract, the outcome classification, and the service that walks one
//! class through scratch preparation, tool launch, output capture, and
//! cleanup. [`backends`] holds the adapters for the concrete tools.
//!
//! [`Disassembler`]: disassembly::Disassembler

pub mod backends;
pub mod disassembly;
