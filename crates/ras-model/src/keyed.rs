//! `Key=Value` lines with significant padding

/// Whether a line carries `key` (leading whitespace ignored)
#[inline]
#[must_use]
pub fn matches_key(line: &str, key: &str) -> bool {
    line.trim_start().starts_with(key)
}

/// Borrowed view of a `Key=Value` line
///
/// The raw value keeps its right padding: HEC-RAS reads some fields by
/// column, so the padded width is part of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedLine<'a> {
    indent: &'a str,
    key: &'a str,
    value: &'a str,
}

impl<'a> KeyedLine<'a> {
    /// Split `line` at `key`, which must include its `=`
    #[must_use]
    pub fn parse(line: &'a str, key: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        let value = trimmed.strip_prefix(key)?;
        Some(Self {
            indent,
            key: &trimmed[..key.len()],
            value,
        })
    }

    /// Key including the `=`
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Value without surrounding whitespace
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value.trim()
    }

    /// Value exactly as written, padding included
    #[inline]
    #[must_use]
    pub fn raw_value(&self) -> &'a str {
        self.value
    }

    /// Character width of the raw value
    #[inline]
    #[must_use]
    pub fn field_width(&self) -> usize {
        self.value.chars().count()
    }

    /// Render the line with `value` left-justified in the old field width
    ///
    /// Values longer than the field are written in full.
    #[must_use]
    pub fn with_value(&self, value: &str) -> String {
        let width = self.field_width();
        format!("{}{}{value:<width$}", self.indent, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_padded_line() {
        let line = KeyedLine::parse("Short Identifier=MW_10cms      ", "Short Identifier=").unwrap();
        assert_eq!(line.key(), "Short Identifier=");
        assert_eq!(line.value(), "MW_10cms");
        assert_eq!(line.raw_value(), "MW_10cms      ");
        assert_eq!(line.field_width(), 14);
    }

    #[test]
    fn parse_rejects_other_key() {
        assert!(KeyedLine::parse("Flow Hydrograph Slope= 0.1 ", "Flow Hydrograph=").is_none());
        assert!(KeyedLine::parse("Plan Title=x", "Flow Title=").is_none());
    }

    #[test]
    fn with_value_preserves_width() {
        let original = "Short Identifier=MW_10cms      ";
        let line = KeyedLine::parse(original, "Short Identifier=").unwrap();
        let patched = line.with_value("MW_8cms");
        assert_eq!(patched, "Short Identifier=MW_8cms       ");
        assert_eq!(patched.len(), original.len());
    }

    #[test]
    fn with_value_grows_when_needed() {
        let line = KeyedLine::parse("Plan Title=MW_4cms", "Plan Title=").unwrap();
        assert_eq!(line.with_value("MW_2o50cms"), "Plan Title=MW_2o50cms");
    }

    #[test]
    fn indentation_is_kept() {
        let line = KeyedLine::parse("  Flow File=u01", "Flow File=").unwrap();
        assert_eq!(line.with_value("u02"), "  Flow File=u02");
        assert!(matches_key("  Flow File=u01", "Flow File="));
    }
}
