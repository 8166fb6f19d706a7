//! Single-use scratch files that hand class bytes to an external tool.

use std::io::{self, Write};
use std::path::Path;

use tempfile::{Builder, TempPath};

/// A class unit materialized on disk for a tool that wants a path rather
/// than a buffer.
///
/// The file exists only between [`ScratchClass::create_in`] and
/// [`ScratchClass::remove`]; it never outlives one invocation. Names are
/// unique per call so concurrent unrelated work in the same process cannot
/// collide with it. Dropping a `ScratchClass` that was never removed (an
/// unwind, an early return) deletes the file best-effort.
#[derive(Debug)]
pub struct ScratchClass {
    path: TempPath,
}

impl ScratchClass {
    /// Write `bytes` to a fresh, uniquely named `.class` file under `dir`.
    pub fn create_in(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let mut file = Builder::new().prefix("jdis-").suffix(".class").tempfile_in(dir)?;
        file.write_all(bytes)?;
        Ok(Self { path: file.into_temp_path() })
    }

    /// Location of the backing file, handed to the external tool.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file.
    ///
    /// A file that is already gone counts as success: cleanup paths call
    /// this unconditionally and must not fail for that reason.
    pub fn remove(self) -> io::Result<()> {
        match self.path.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
