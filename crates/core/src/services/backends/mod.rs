pub mod javap;

pub use javap::JavapDisassembler;
