//! Directory listings of titles and plans

use crate::error::EditResult;
use crate::io::read_config;
use crate::sequence::DirectoryScanner;
use ras_model::{FileRole, PlanRecord, RasExtension};
use serde::Serialize;
use std::path::Path;

/// Title of one project file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleEntry {
    /// File name
    pub file_name: String,
    /// Role and number
    pub extension: RasExtension,
    /// Value of the role's title line, if any
    pub title: Option<String>,
}

/// Plan file with its record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// File name
    pub file_name: String,
    /// Parsed plan fields
    #[serde(flatten)]
    pub record: PlanRecord,
}

/// Titles of every numbered file in `dir`, sorted by file name
///
/// # Errors
/// Returns [`crate::EditError::Io`] if the directory or a file cannot be read
pub fn scan_titles(dir: impl AsRef<Path>) -> EditResult<Vec<TitleEntry>> {
    let scanner = DirectoryScanner::new(dir.as_ref());
    let mut entries = Vec::new();

    for (path, extension) in scanner.files()? {
        let file = read_config(&path)?;
        let title = file
            .value(extension.role().title_key())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        entries.push(TitleEntry {
            file_name: file_name(&path),
            extension,
            title,
        });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::debug!("Found {} titled file(s) in {}", entries.len(), scanner.dir().display());
    Ok(entries)
}

/// Plan records of every plan file in `dir`, sorted by file name
///
/// # Errors
/// - [`crate::EditError::Io`] if the directory or a file cannot be read
/// - [`crate::EditError::Model`] if a plan references a malformed file
pub fn scan_plans(dir: impl AsRef<Path>) -> EditResult<Vec<PlanEntry>> {
    let scanner = DirectoryScanner::new(dir.as_ref());
    let mut entries = Vec::new();

    for (path, extension) in scanner.files()? {
        if extension.role() != FileRole::Plan {
            continue;
        }
        let file = read_config(&path)?;
        entries.push(PlanEntry {
            file_name: file_name(&path),
            record: PlanRecord::from_config(&file)?,
        });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
