// # Output Sink
//
// Commits a fully generated document to its destination.
//
// ## Atomicity
//
// - File targets: the document is written to a sibling temporary file,
//   flushed to disk and renamed over the target. A failure at any step
//   leaves the previous file untouched.
// - Standard output: written in one call once the document is complete.
//
// Nothing is ever written before the whole document exists in memory.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::OutputTarget;
use crate::error::{Error, Result};

/// Read the current content of an output target, byte for byte
///
/// Standard output has no content of its own; the existing document is
/// read from standard input instead (filter mode).
pub fn read_existing(target: &OutputTarget) -> Result<Vec<u8>> {
    match target {
        OutputTarget::File(path) => fs::read(path).map_err(|e| Error::file(path, e)),
        OutputTarget::Stdout => {
            let mut content = Vec::new();
            io::stdin().lock().read_to_end(&mut content)?;
            Ok(content)
        }
    }
}

/// Write a complete document to an output target
pub fn commit(target: &OutputTarget, content: &[u8]) -> Result<()> {
    match target {
        OutputTarget::File(path) => write_atomic(path, content),
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Replace `path` with `content` using write-then-rename
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path(path);

    if let Err(e) = write_temp(path, &temp_path, content) {
        // Best effort: the temporary file is useless once writing failed.
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::file(path, e)
    })?;

    trace!("Output written to file: {}", path.display());
    Ok(())
}

fn write_temp(path: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path).map_err(|e| Error::file(temp_path, e))?;
    file.write_all(content)
        .map_err(|e| Error::file(temp_path, e))?;
    file.sync_all().map_err(|e| Error::file(temp_path, e))?;

    // Keep the mode of the file being replaced.
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(temp_path, meta.permissions())
            .map_err(|e| Error::file(temp_path, e))?;
        debug!("Copied permissions of {} to staging file", path.display());
    }

    Ok(())
}

/// Get path to temporary file for atomic writes
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
