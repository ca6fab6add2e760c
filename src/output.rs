//! Output file writing.
//!
//! Each run fully replaces any previous output at the destination. The
//! file is assembled in a temporary sibling and renamed into place, so
//! a failed run never leaves a half-written toolpath behind.

use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::gcode::Instruction;

/// Write instructions to `path`, one per line, replacing any existing file.
pub fn write_gcode<P: AsRef<Path>>(path: P, instructions: &[Instruction]) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| Error::OutputWrite {
        path: path.display().to_string(),
        source,
    };

    // The temp file must live in the destination directory for the
    // final rename to stay atomic.
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(write_err)?;

    let mut writer = BufWriter::new(tmp);
    for instruction in instructions {
        writeln!(writer, "{}", instruction).map_err(write_err)?;
    }

    let tmp = writer
        .into_inner()
        .map_err(|e| write_err(e.into_error()))?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
