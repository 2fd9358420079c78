//! All-or-nothing file output.

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Write `content` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over `path` only after every byte has been
/// written and flushed, so readers never observe a partial file. An existing
/// target keeps its permissions; a new file gets `rw-r--r--` on Unix.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;

    let permissions = match fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => new_file_permissions(file.as_file())?,
    };
    file.as_file().set_permissions(permissions)?;
    file.as_file().sync_all()?;

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions(_file: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(file: &File) -> io::Result<Permissions> {
    Ok(file.metadata()?.permissions())
}
