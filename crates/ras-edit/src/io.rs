//! Reading and persisting HEC-RAS files

use crate::error::{EditError, EditResult};
use ras_model::ConfigFile;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Read a text file into a [`ConfigFile`]
///
/// # Errors
/// Returns [`EditError::Io`] if the file cannot be read as UTF-8 text
pub fn read_config(path: impl AsRef<Path>) -> EditResult<ConfigFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| EditError::io(path, e))?;
    Ok(ConfigFile::parse(path, &content))
}

/// Write `file` to its path, failing if anything already exists there
///
/// # Errors
/// - [`EditError::TargetExists`] if the path is taken
/// - [`EditError::Io`] on any other write failure
pub fn write_new(file: &ConfigFile) -> EditResult<()> {
    let path = file.path();
    let mut handle = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => EditError::TargetExists(path.to_path_buf()),
            _ => EditError::io(path, e),
        })?;
    handle
        .write_all(file.render().as_bytes())
        .map_err(|e| EditError::io(path, e))?;
    tracing::debug!("Wrote new file {}", path.display());
    Ok(())
}

/// Overwrite `file` at its path
///
/// # Errors
/// Returns [`EditError::Io`] if the file cannot be written
pub fn write_in_place(file: &ConfigFile) -> EditResult<()> {
    let path = file.path();
    std::fs::write(path, file.render()).map_err(|e| EditError::io(path, e))?;
    tracing::debug!("Rewrote {}", path.display());
    Ok(())
}
