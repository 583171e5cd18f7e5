use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

/// Create an empty marker at `path` unless something already exists there.
///
/// Returns `true` only when this call created the file. An existing entry,
/// including one created concurrently by another process, is left untouched.
pub fn create_marker(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::trace!("already present: {}", path.display());
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("failed to write {}", path.display())),
    }
}
