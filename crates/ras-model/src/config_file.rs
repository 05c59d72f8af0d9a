//! Line-oriented HEC-RAS text files
//!
//! A [`ConfigFile`] is read once, edited as a list of lines and rendered
//! back with the original line ending, so every untouched line of a file
//! with consistent endings is reproduced byte-for-byte. Files mixing `\n`
//! and `\r\n` are rendered with the first ending found.

use crate::error::ModelError;
use crate::extension::RasExtension;
use crate::keyed::{matches_key, KeyedLine};
use crate::role::FileRole;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Line terminator of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, as written by HEC-RAS on Windows
    CrLf,
}

impl LineEnding {
    /// Terminator text
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detect from content (first terminator wins)
    #[must_use]
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(i) if i > 0 && content.as_bytes()[i - 1] == b'\r' => Self::CrLf,
            _ => Self::Lf,
        }
    }
}

/// In-memory HEC-RAS text file
///
/// # Invariants
/// - `render(parse(path, s)) == s` for any `s` with consistent line endings
/// - Mixed endings are rendered with [`LineEnding::detect`]; only a
///   CRLF-first file changes bytes, turning its bare `\n` into `\r\n`
/// - Lines never contain their terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    lines: Vec<String>,
    line_ending: LineEnding,
    final_newline: bool,
}

impl ConfigFile {
    /// Split content into lines
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let line_ending = LineEnding::detect(content);
        let final_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);

        let lines = if content.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|line| match line_ending {
                    LineEnding::CrLf => line.strip_suffix('\r').unwrap_or(line),
                    LineEnding::Lf => line,
                })
                .map(str::to_string)
                .collect()
        };

        Self {
            path: path.into(),
            lines,
            line_ending,
            final_newline,
        }
    }

    /// Render back to text
    #[must_use]
    pub fn render(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut out = self.lines.join(ending);
        if self.final_newline {
            out.push_str(ending);
        }
        out
    }

    /// File path (identity)
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-home the file, e.g. before persisting it under a new extension
    #[inline]
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Extension parsed from the path
    ///
    /// # Errors
    /// Returns error if the path has no numbered role extension
    #[inline]
    pub fn extension(&self) -> Result<RasExtension, ModelError> {
        RasExtension::from_path(&self.path)
    }

    /// Role parsed from the path
    ///
    /// # Errors
    /// Returns error if the path has no numbered role extension
    #[inline]
    pub fn role(&self) -> Result<FileRole, ModelError> {
        self.extension().map(|ext| ext.role())
    }

    /// Detected line ending
    #[inline]
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// All lines
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the file has no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`
    #[inline]
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Replace line at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of bounds
    #[inline]
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        self.lines[index] = text.into();
    }

    /// Insert a line before `index` (`index == len()` appends)
    ///
    /// # Panics
    /// Panics if `index > len()`
    #[inline]
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) {
        self.lines.insert(index, text.into());
    }

    /// Replace a range of lines with new ones
    ///
    /// # Panics
    /// Panics if the range is out of bounds
    pub fn splice_lines<I>(&mut self, range: Range<usize>, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.lines.splice(range, lines);
    }

    /// Index of the first line carrying `key`
    #[must_use]
    pub fn find_key(&self, key: &str) -> Option<usize> {
        self.lines.iter().position(|line| matches_key(line, key))
    }

    /// Index of the last line carrying `key`
    #[must_use]
    pub fn last_key(&self, key: &str) -> Option<usize> {
        self.lines.iter().rposition(|line| matches_key(line, key))
    }

    /// Indices of every line carrying `key`
    #[must_use]
    pub fn key_indices(&self, key: &str) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| matches_key(line, key))
            .map(|(i, _)| i)
            .collect()
    }

    /// Trimmed value of the first line carrying `key`
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        let index = self.find_key(key)?;
        KeyedLine::parse(&self.lines[index], key).map(|line| line.value())
    }

    /// Whether some line equals `text` once surrounding whitespace is ignored
    #[must_use]
    pub fn contains_line(&self, text: &str) -> bool {
        let wanted = text.trim();
        self.lines.iter().any(|line| line.trim() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FLOW: &str = "Flow Title=MW_4cms\nProgram Version=6.10\nFlow Hydrograph= 6 \n      .4      .8     1.5       3       3       3\nFlow Hydrograph Slope= 0.1 \n";

    #[test]
    fn render_roundtrip_lf() {
        let file = ConfigFile::parse("a.u01", FLOW);
        assert_eq!(file.len(), 5);
        assert_eq!(file.render(), FLOW);
    }

    #[test]
    fn render_roundtrip_crlf() {
        let content = FLOW.replace('\n', "\r\n");
        let file = ConfigFile::parse("a.u01", &content);
        assert_eq!(file.line_ending(), LineEnding::CrLf);
        assert_eq!(file.line(0), Some("Flow Title=MW_4cms"));
        assert_eq!(file.render(), content);
    }

    #[test]
    fn mixed_endings_follow_first_line() {
        let file = ConfigFile::parse("a.p01", "Plan Title=A\r\nFlow File=u01\nGeom File=g01\r\n");
        assert_eq!(file.line(1), Some("Flow File=u01"));
        assert_eq!(file.render(), "Plan Title=A\r\nFlow File=u01\r\nGeom File=g01\r\n");

        // A leading LF keeps stray carriage returns in the line text
        let content = "Plan Title=A\nFlow File=u01\r\n";
        let file = ConfigFile::parse("a.p01", content);
        assert_eq!(file.line(1), Some("Flow File=u01\r"));
        assert_eq!(file.render(), content);
    }

    #[test]
    fn render_without_final_newline() {
        let file = ConfigFile::parse("a.prj", "Proj Title=X\nCurrent Plan=p01");
        assert_eq!(file.len(), 2);
        assert_eq!(file.render(), "Proj Title=X\nCurrent Plan=p01");
    }

    #[test]
    fn empty_content() {
        let file = ConfigFile::parse("a.prj", "");
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn key_lookup() {
        let file = ConfigFile::parse("a.u01", FLOW);
        assert_eq!(file.find_key("Flow Hydrograph="), Some(2));
        assert_eq!(file.value("Flow Title="), Some("MW_4cms"));
        assert_eq!(file.value("Flow Hydrograph="), Some("6"));
        assert_eq!(file.value("Missing="), None);
    }

    #[test]
    fn last_key_and_indices() {
        let file = ConfigFile::parse(
            "a.prj",
            "Plan File=p01\nPlan File=p02\nUnsteady File=u01\n",
        );
        assert_eq!(file.last_key("Plan File="), Some(1));
        assert_eq!(file.key_indices("Plan File="), vec![0, 1]);
        assert!(file.contains_line("  Plan File=p02 "));
    }

    #[test]
    fn role_from_path() {
        let file = ConfigFile::parse("/m/MW_Valleys.u07", FLOW);
        assert_eq!(file.role().unwrap(), FileRole::UnsteadyFlow);
        assert_eq!(file.extension().unwrap().number(), 7);

        let project = ConfigFile::parse("/m/MW_Valleys.prj", "");
        assert!(project.role().is_err());
    }

    #[test]
    fn splice_replaces_block() {
        let mut file = ConfigFile::parse("a.u01", FLOW);
        file.splice_lines(3..4, vec!["row1".to_string(), "row2".to_string()]);
        assert_eq!(file.len(), 6);
        assert_eq!(file.line(3), Some("row1"));
        assert_eq!(file.line(5), Some("Flow Hydrograph Slope= 0.1 "));
    }
}
