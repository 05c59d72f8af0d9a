//! Keyed line patching
//!
//! A [`PatchSet`] is an ordered mapping from line key to [`Replacement`].
//! Applying it rewrites every matching line of a [`ConfigFile`] in memory;
//! persisting the result is the caller's concern.
//!
//! # Padding
//!
//! New values are left-justified in the old field width, so a line keeps its
//! length whenever the new value fits. Longer values are written in full.

use crate::config::EditorConfig;
use crate::title::derive_title;
use indexmap::IndexMap;
use ras_model::{keys, ConfigFile, Hydrograph, KeyedLine, FIELD_WIDTH};
use serde::Serialize;

/// How a matching line gets its new value
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Replace the value verbatim
    Fixed(String),

    /// Keep the title's site prefix and swap in `flow` (`MW_4cms` → `MW_8cms`)
    FlowTitle {
        /// New flow magnitude
        flow: f64,
    },

    /// Set the header to the ordinate count and replace the data rows below it
    Hydrograph(Hydrograph),
}

/// What a patch run touched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Keys found and rewritten, in patch order
    pub applied: Vec<String>,
    /// Keys with no matching line
    pub skipped: Vec<String>,
    /// Lines whose text changed
    pub lines_changed: usize,
}

impl PatchReport {
    /// Whether every key matched at least one line
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Whether the file content is unchanged
    #[inline]
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.lines_changed == 0
    }
}

/// Ordered key → replacement mapping
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSet {
    entries: IndexMap<String, Replacement>,
    flow_unit: String,
    values_per_row: usize,
}

impl Default for PatchSet {
    fn default() -> Self {
        Self::for_config(&EditorConfig::default())
    }
}

impl PatchSet {
    /// Empty patch set with default title unit and row layout
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty patch set using the configured title unit and row layout
    #[must_use]
    pub fn for_config(config: &EditorConfig) -> Self {
        Self {
            entries: IndexMap::new(),
            flow_unit: config.flow_unit.clone(),
            values_per_row: config.hydrograph.values_per_row,
        }
    }

    /// Add or replace the strategy for `key`
    ///
    /// A missing `=` is appended to the key.
    #[must_use]
    pub fn set(mut self, key: &str, replacement: Replacement) -> Self {
        self.insert(key, replacement);
        self
    }

    /// Add or replace the strategy for `key` in place
    pub fn insert(&mut self, key: &str, replacement: Replacement) {
        self.entries.insert(keys::normalize(key), replacement);
    }

    /// Replace `key`'s value verbatim
    #[must_use]
    pub fn fixed(self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, Replacement::Fixed(value.into()))
    }

    /// Title for `flow`: the explicit title when given, derived otherwise
    #[must_use]
    pub fn title(self, key: &str, explicit: Option<&str>, flow: f64) -> Self {
        match explicit {
            Some(title) => self.fixed(key, title),
            None => self.set(key, Replacement::FlowTitle { flow }),
        }
    }

    /// Replace the `Flow Hydrograph=` block
    #[must_use]
    pub fn hydrograph(self, hydrograph: Hydrograph) -> Self {
        self.set(keys::FLOW_HYDROGRAPH, Replacement::Hydrograph(hydrograph))
    }

    /// Strategy for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Replacement> {
        self.entries.get(&keys::normalize(key))
    }

    /// Keys in patch order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every line matching a key of this set
    ///
    /// Keys without a matching line are skipped and reported.
    pub fn apply(&self, file: &mut ConfigFile) -> PatchReport {
        let mut report = PatchReport::default();

        for (key, replacement) in &self.entries {
            let indices = file.key_indices(key);
            if indices.is_empty() {
                tracing::warn!("{}: key '{}' not found, skipped", file.path().display(), key);
                report.skipped.push(key.clone());
                continue;
            }

            // Reverse order keeps earlier indices valid across splices
            for &index in indices.iter().rev() {
                report.lines_changed += match replacement {
                    Replacement::Fixed(value) => replace_value(file, index, key, |_| value.clone()),
                    Replacement::FlowTitle { flow } => replace_value(file, index, key, |old| {
                        derive_title(old, *flow, &self.flow_unit)
                    }),
                    Replacement::Hydrograph(hydrograph) => {
                        self.replace_block(file, index, key, hydrograph)
                    }
                };
            }

            tracing::debug!(
                "{}: patched {} line(s) of '{}'",
                file.path().display(),
                indices.len(),
                key
            );
            report.applied.push(key.clone());
        }

        report
    }

    fn replace_block(
        &self,
        file: &mut ConfigFile,
        index: usize,
        key: &str,
        hydrograph: &Hydrograph,
    ) -> usize {
        let Some(old) = file.line(index) else {
            return 0;
        };
        let Some(line) = KeyedLine::parse(old, key) else {
            return 0;
        };

        let header = line.with_value(&format!(" {} ", hydrograph.len()));
        let old_rows = old_row_count(file, index, line.value().parse().ok());

        let mut block = Vec::with_capacity(1 + hydrograph.len());
        block.push(header);
        block.extend(hydrograph.to_rows(self.values_per_row));

        let changed = block
            .iter()
            .enumerate()
            .filter(|(offset, text)| file.line(index + offset) != Some(text.as_str()))
            .count()
            + old_rows.saturating_sub(block.len() - 1);

        file.splice_lines(index..index + 1 + old_rows, block);
        changed
    }
}

/// Rewrite the value of the keyed line at `index`, returning lines changed
fn replace_value<F>(file: &mut ConfigFile, index: usize, key: &str, value: F) -> usize
where
    F: FnOnce(&str) -> String,
{
    let Some(old) = file.line(index) else {
        return 0;
    };
    let Some(line) = KeyedLine::parse(old, key) else {
        return 0;
    };
    let patched = line.with_value(&value(line.value()));
    if patched == old {
        return 0;
    }
    file.set_line(index, patched);
    1
}

/// Data rows following the header at `index`
///
/// Rows are consumed until they hold the old ordinate count, whatever their
/// width, stopping at any keyed line. An unreadable count stands for a
/// single row.
fn old_row_count(file: &ConfigFile, index: usize, old_count: Option<usize>) -> usize {
    let rows = file.lines()[index + 1..]
        .iter()
        .take_while(|row| !row.contains('='));

    let Some(count) = old_count else {
        return rows.take(1).count();
    };

    let mut seen = 0;
    rows.take_while(|row| {
        let more = seen < count;
        seen += row_value_count(row);
        more
    })
    .count()
}

/// Non-blank columns of one data row
fn row_value_count(row: &str) -> usize {
    row.as_bytes()
        .chunks(FIELD_WIDTH)
        .filter(|column| !column.iter().all(u8::is_ascii_whitespace))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FLOW: &str = concat!(
        "Flow Title=MW_4cms\n",
        "Program Version=6.10\n",
        "Boundary Location=Valley,Reach,1000\n",
        "Interval=1HOUR\n",
        "Flow Hydrograph= 6 \n",
        "      .4      .8     1.5       3       3       3\n",
        "Stage Hydrograph TW Check=0\n",
        "Flow Hydrograph Slope= 0.1 \n",
    );

    const PLAN: &str = "\
Plan Title=MW_4cms
Program Version=6.10
Short Identifier=MW_4cms
Geom File=g01
Flow File=u01
";

    #[test]
    fn fixed_keeps_field_width() {
        let mut file = ConfigFile::parse("MW.p01", PLAN);
        let before = file.line(2).unwrap().len();

        let report = PatchSet::new()
            .fixed(keys::SHORT_IDENTIFIER, "MW_8cms")
            .apply(&mut file);

        assert!(report.is_complete());
        assert_eq!(report.lines_changed, 1);
        assert_eq!(file.value(keys::SHORT_IDENTIFIER), Some("MW_8cms"));
        assert_eq!(file.line(2).unwrap().len(), before);
    }

    #[test]
    fn derived_titles() {
        let mut file = ConfigFile::parse("MW.p01", PLAN);
        PatchSet::new()
            .title(keys::PLAN_TITLE, None, 2.5)
            .title(keys::SHORT_IDENTIFIER, None, 2.5)
            .apply(&mut file);

        assert_eq!(file.line(0), Some("Plan Title=MW_2o50cms"));
        assert_eq!(file.value(keys::SHORT_IDENTIFIER), Some("MW_2o50cms"));
    }

    #[test]
    fn explicit_title_wins() {
        let mut file = ConfigFile::parse("MW.p01", PLAN);
        PatchSet::new()
            .title(keys::PLAN_TITLE, Some("Design storm"), 8.0)
            .apply(&mut file);
        assert_eq!(file.value(keys::PLAN_TITLE), Some("Design storm"));
    }

    #[test]
    fn missing_key_is_reported() {
        let mut file = ConfigFile::parse("MW.p01", PLAN);
        let report = PatchSet::new()
            .fixed("Current Plan", "p02")
            .fixed(keys::FLOW_FILE, "u02")
            .apply(&mut file);

        assert_eq!(report.applied, vec!["Flow File=".to_string()]);
        assert_eq!(report.skipped, vec!["Current Plan=".to_string()]);
        assert!(!report.is_complete());
        assert_eq!(file.value(keys::FLOW_FILE), Some("u02"));
    }

    #[test]
    fn every_matching_line_is_patched() {
        let mut file = ConfigFile::parse("MW.u01", "Flow Title=A_1cms\nX=1\nFlow Title=B_1cms\n");
        let report = PatchSet::new()
            .title(keys::FLOW_TITLE, None, 3.0)
            .apply(&mut file);
        assert_eq!(report.lines_changed, 2);
        assert_eq!(file.render(), "Flow Title=A_3cms\nX=1\nFlow Title=B_3cms\n");
    }

    #[test]
    fn unchanged_value_is_not_counted() {
        let mut file = ConfigFile::parse("MW.p01", PLAN);
        let report = PatchSet::new().fixed(keys::FLOW_FILE, "u01").apply(&mut file);
        assert!(report.is_unchanged());
        assert_eq!(file.render(), PLAN);
    }

    #[test]
    fn hydrograph_block_replaced() {
        let mut file = ConfigFile::parse("MW.u01", FLOW);
        let hydrograph = Hydrograph::ramp_to_peak(8.0, 2, 3);

        PatchSet::new().hydrograph(hydrograph.clone()).apply(&mut file);

        let expected = FLOW.replace(
            "Flow Hydrograph= 6 \n      .4      .8     1.5       3       3       3\n",
            "Flow Hydrograph= 5 \n   2.667   5.333       8       8       8\n",
        );
        assert_eq!(file.render(), expected);

        let header = file.find_key(keys::FLOW_HYDROGRAPH).unwrap();
        let parsed = Hydrograph::parse_rows(5, file.lines()[header + 1..].iter().map(String::as_str))
            .unwrap();
        assert_eq!(parsed.values()[2..], hydrograph.values()[2..]);
    }

    #[test]
    fn hydrograph_block_grows_and_shrinks() {
        let mut file = ConfigFile::parse("MW.u01", FLOW);
        PatchSet::new()
            .hydrograph(Hydrograph::ramp_to_peak(10.0, 0, 12))
            .apply(&mut file);
        assert_eq!(file.value(keys::FLOW_HYDROGRAPH), Some("12"));
        assert_eq!(file.line(6), Some("      10      10"));
        assert_eq!(file.line(7), Some("Stage Hydrograph TW Check=0"));

        PatchSet::new()
            .hydrograph(Hydrograph::ramp_to_peak(1.0, 0, 1))
            .apply(&mut file);
        assert_eq!(file.line(4), Some("Flow Hydrograph= 1  "));
        assert_eq!(file.line(5), Some("       1"));
        assert_eq!(file.line(6), Some("Stage Hydrograph TW Check=0"));
    }

    #[test]
    fn hydrograph_never_crosses_keyed_line() {
        // Header claims 20 values but only one row follows
        let content = "Flow Hydrograph= 20 \n       1       2\nInterval=1HOUR\n";
        let mut file = ConfigFile::parse("MW.u01", content);
        PatchSet::new()
            .hydrograph(Hydrograph::new(vec![5.0]))
            .apply(&mut file);
        assert_eq!(file.render(), "Flow Hydrograph= 1  \n       5\nInterval=1HOUR\n");
    }

    #[test]
    fn unreadable_count_replaces_one_row() {
        let content = "Flow Hydrograph= ? \n       1\n       2\n";
        let mut file = ConfigFile::parse("MW.u01", content);
        PatchSet::new()
            .hydrograph(Hydrograph::new(vec![4.0, 4.0]))
            .apply(&mut file);
        assert_eq!(file.render(), "Flow Hydrograph= 2 \n       4       4\n       2\n");
    }

    #[test]
    fn narrow_rows_are_fully_replaced() {
        let content = "Flow Hydrograph= 3 \n       1       2\n       3\nInterval=1HOUR\n";
        let mut file = ConfigFile::parse("MW.u02", content);
        let report = PatchSet::for_config(&EditorConfig::new().with_values_per_row(2))
            .hydrograph(Hydrograph::new(vec![1.0, 2.0, 3.0]))
            .apply(&mut file);

        assert_eq!(file.render(), content);
        assert_eq!(report.lines_changed, 0);
    }

    #[test]
    fn old_rows_counted_by_values() {
        let content = "Flow Hydrograph= 5 \n       1\n       2       3\n\n       4       5\n       9\n";
        let file = ConfigFile::parse("MW.u01", content);
        assert_eq!(old_row_count(&file, 0, Some(5)), 4);
        assert_eq!(old_row_count(&file, 0, Some(0)), 0);
        assert_eq!(old_row_count(&file, 0, None), 1);
    }

    #[test]
    fn key_normalization() {
        let set = PatchSet::new().fixed("Plan Title", "x");
        assert!(set.get(keys::PLAN_TITLE).is_some());
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["Plan Title="]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn configured_unit_and_layout() {
        let config = EditorConfig::new().with_flow_unit("cfs").with_values_per_row(2);
        let mut file = ConfigFile::parse("MW.u01", FLOW);
        PatchSet::for_config(&config)
            .title(keys::FLOW_TITLE, None, 5.0)
            .hydrograph(Hydrograph::new(vec![1.0, 2.0, 3.0]))
            .apply(&mut file);

        assert_eq!(file.line(0), Some("Flow Title=MW_5cfs"));
        assert_eq!(file.line(5), Some("       1       2"));
        assert_eq!(file.line(6), Some("       3"));
    }
}
